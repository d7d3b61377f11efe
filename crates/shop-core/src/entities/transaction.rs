use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TransactionKind;
use crate::errors::CoreError;

/// A recorded stock movement as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub product: String,
    pub quantity: u64,
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub kind: TransactionKind,
    pub date: String,
}

/// Body of `POST /data/transaction`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTransaction {
    pub product: String,
    pub quantity: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl NewTransaction {
    #[must_use]
    pub fn new(product: impl Into<String>, quantity: u64, kind: TransactionKind) -> Self {
        Self {
            product: product.into(),
            quantity,
            kind,
        }
    }

    /// Check the write before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a blank product or a zero quantity.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.product.trim().is_empty() {
            return Err(CoreError::Validation("product must not be empty".into()));
        }
        if self.quantity == 0 {
            return Err(CoreError::Validation(
                "quantity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_sale_rows_parse_as_sell() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":7,"product":"Oil","quantity":3,"type":"Sale","date":"2025-09-01"}"#,
        )
        .unwrap();
        assert_eq!(tx.kind, TransactionKind::Sell);
        assert_eq!(tx.id, 7);
    }

    #[test]
    fn new_transaction_body_uses_type_key() {
        let body = NewTransaction::new("Rice", 2, TransactionKind::Buy);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "buy");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn validate_rejects_zero_quantity_and_blank_product() {
        assert!(NewTransaction::new("Rice", 0, TransactionKind::Sell).validate().is_err());
        assert!(NewTransaction::new("  ", 1, TransactionKind::Sell).validate().is_err());
        assert!(NewTransaction::new("Rice", 1, TransactionKind::Sell).validate().is_ok());
    }
}
