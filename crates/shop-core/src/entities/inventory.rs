use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Stock level for one product at the time of the read.
///
/// The pricing columns are only present when the backend ran its dynamic
/// pricing pass over the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InventoryItem {
    pub product: String,
    pub stock: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
}

impl InventoryItem {
    /// An item with no pricing information.
    #[must_use]
    pub fn new(product: impl Into<String>, stock: u64) -> Self {
        Self {
            product: product.into(),
            stock,
            expiry_date: None,
            base_price: None,
            adjusted_price: None,
            discount_percent: None,
        }
    }
}

/// Reject a snapshot that lists the same product twice.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming the first duplicated product.
pub fn ensure_unique_products(items: &[InventoryItem]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.product.as_str()) {
            return Err(CoreError::Validation(format!(
                "duplicate product '{}' in inventory snapshot",
                item.product
            )));
        }
    }
    Ok(())
}
