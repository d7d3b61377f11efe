//! Pure derivations over console state.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;
use shop_core::entities::{ClassificationResult, InventoryItem, ProductClassification, Transaction};

/// One row of the feature-importance ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryCounts {
    pub product_count: usize,
    pub transaction_count: usize,
}

/// The classification entry for the selected product, if both exist.
#[must_use]
pub fn selected_product_view<'a>(
    classification: Option<&'a ClassificationResult>,
    selected: Option<&str>,
) -> Option<&'a ProductClassification> {
    classification?.product(selected?)
}

/// Feature importances of `view`, highest first, ties broken by name.
///
/// Features named in `excluded` are dropped.
#[must_use]
pub fn sorted_feature_importance(
    view: &ProductClassification,
    excluded: &BTreeSet<String>,
) -> Vec<FeatureImportance> {
    let mut rows: Vec<FeatureImportance> = view
        .feature_importance
        .iter()
        .filter(|(feature, _)| !excluded.contains(*feature))
        .map(|(feature, importance)| FeatureImportance {
            feature: feature.clone(),
            importance: *importance,
        })
        .collect();
    rows.sort_by(|a, b| match b.importance.total_cmp(&a.importance) {
        Ordering::Equal => a.feature.cmp(&b.feature),
        other => other,
    });
    rows
}

#[must_use]
pub const fn summary_counts(
    inventory: &[InventoryItem],
    transactions: &[Transaction],
) -> SummaryCounts {
    SummaryCounts {
        product_count: inventory.len(),
        transaction_count: transactions.len(),
    }
}

/// Format a ratio as a percentage with two decimals: `0.875` → `87.50%`.
#[must_use]
pub fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
