use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sales and stock totals for one week of a month.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WeeklySummary {
    pub month: String,
    pub week: u8,
    pub total_sales: u64,
    pub average_stock_left: f64,
    pub product_breakdown: Vec<ProductBreakdown>,
}

/// Per-product totals inside a [`WeeklySummary`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProductBreakdown {
    pub product: String,
    pub stock_sold: f64,
    pub stock_left: f64,
}
