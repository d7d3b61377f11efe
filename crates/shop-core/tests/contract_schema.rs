//! Backend payload fixtures validated against the schemars-generated schemas.

use schemars::schema_for;
use shop_core::entities::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! fixture_matches_schema {
    ($name:ident, $ty:ty, $fixture:expr) => {
        #[test]
        fn $name() {
            let instance: serde_json::Value = serde_json::from_str($fixture).unwrap();

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );

            let parsed: $ty = serde_json::from_value(instance).unwrap();
            let reencoded = serde_json::to_value(&parsed).unwrap();
            let errors = validate_against_schema(&schema, &reencoded);
            assert!(errors.is_empty(), "re-encoded {} invalid: {:?}", stringify!($ty), errors);
        }
    };
}

fixture_matches_schema!(
    inventory_item_plain,
    InventoryItem,
    r#"{"product": "Rice", "stock": 12}"#
);

fixture_matches_schema!(
    inventory_item_priced,
    InventoryItem,
    r#"{"product": "Milk", "stock": 4, "expiry_date": "2025-09-16",
        "base_price": 2.5, "adjusted_price": 1.25, "discount_percent": 50}"#
);

fixture_matches_schema!(
    transaction_sale_row,
    Transaction,
    r#"{"id": 101, "product": "Oil", "quantity": 3, "type": "Sale", "date": "2025-09-01"}"#
);

fixture_matches_schema!(
    new_transaction_body,
    NewTransaction,
    r#"{"product": "Oil", "quantity": 1, "type": "buy"}"#
);

fixture_matches_schema!(
    forecast_entry,
    ForecastEntry,
    r#"{"product": "Rice", "predicted_sales": 320}"#
);

fixture_matches_schema!(
    classification_result,
    ClassificationResult,
    r#"{"overall_accuracy": 0.87, "products": [
        {"product": "Rice", "accuracy": 0.91, "top_feature": "month",
         "feature_importance": {"month": 0.4, "base_price": 0.2}}
    ]}"#
);

fixture_matches_schema!(
    weekly_summary,
    WeeklySummary,
    r#"{"month": "March", "week": 2, "total_sales": 140, "average_stock_left": 33.5,
        "product_breakdown": [{"product": "Rice", "stock_sold": 80, "stock_left": 30.0}]}"#
);

#[test]
fn schema_rejects_negative_stock() {
    let schema = serde_json::to_value(schema_for!(InventoryItem)).unwrap();
    let instance = serde_json::json!({"product": "Rice", "stock": -1});
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}
