use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output of the sales-performance classifier.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClassificationResult {
    pub overall_accuracy: f64,
    pub products: Vec<ProductClassification>,
}

impl ClassificationResult {
    /// Look up a product's classification by name.
    #[must_use]
    pub fn product(&self, name: &str) -> Option<&ProductClassification> {
        self.products.iter().find(|p| p.product == name)
    }

    /// Whether `name` is one of the classified products.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.product(name).is_some()
    }

    /// Name of the first classified product, if any.
    #[must_use]
    pub fn first_product(&self) -> Option<&str> {
        self.products.first().map(|p| p.product.as_str())
    }
}

/// Per-product classifier accuracy and feature importances.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProductClassification {
    pub product: String,
    pub accuracy: f64,
    pub top_feature: String,
    /// Importance score per feature. Unordered on the wire.
    pub feature_importance: BTreeMap<String, f64>,
}
