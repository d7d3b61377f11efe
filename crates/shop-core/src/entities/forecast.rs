use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Predicted sales for one product over the next month.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ForecastEntry {
    pub product: String,
    pub predicted_sales: f64,
}
