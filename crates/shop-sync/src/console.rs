//! Operator-facing facade over the store and the three controllers.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use shop_config::ShopConfig;
use shop_core::entities::NewTransaction;
use shop_core::enums::RowLimit;
use shop_core::filter::FilterState;
use shop_gateway::Gateway;
use tracing::debug;

use crate::error::SyncError;
use crate::fetch::FetchOrchestrator;
use crate::ml::MlController;
use crate::mutation::MutationCoordinator;
use crate::query::PendingQuery;
use crate::store::{ConsoleSnapshot, Store};
use crate::view::{self, FeatureImportance, SummaryCounts};

/// Console behavior knobs, usually taken from [`ShopConfig`].
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    pub default_row_limit: RowLimit,
    pub cancel_superseded: bool,
    pub excluded_features: BTreeSet<String>,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            default_row_limit: RowLimit::default(),
            cancel_superseded: true,
            excluded_features: BTreeSet::new(),
        }
    }
}

impl ConsoleOptions {
    #[must_use]
    pub fn from_config(config: &ShopConfig) -> Self {
        Self {
            default_row_limit: config.sync.default_row_limit,
            cancel_superseded: config.sync.cancel_superseded,
            excluded_features: config.view.excluded_features.iter().cloned().collect(),
        }
    }
}

/// An operator action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// Set or clear the date filter.
    SetDate(Option<NaiveDate>),
    SetRowLimit(RowLimit),
    Refresh,
    Submit(NewTransaction),
    RunForecast,
    RunClassification,
    SelectProduct(String),
}

/// What handling a [`ConsoleEvent`] did.
#[derive(Debug)]
pub enum EventEffect {
    /// The value was already set; nothing was issued.
    Unchanged,
    /// A read was issued.
    Issued(PendingQuery),
    /// The selected product changed.
    Selected,
    /// The action was refused before anything was issued.
    Rejected(SyncError),
}

impl EventEffect {
    /// The issued read, if any.
    #[must_use]
    pub fn into_pending(self) -> Option<PendingQuery> {
        match self {
            Self::Issued(pending) => Some(pending),
            _ => None,
        }
    }
}

/// The analytics console core.
///
/// Cheap to share by reference; every method takes `&self`.
#[derive(Debug)]
pub struct Console<G> {
    store: Arc<Store>,
    fetch: FetchOrchestrator<G>,
    mutation: MutationCoordinator<G>,
    ml: MlController<G>,
    excluded_features: BTreeSet<String>,
}

impl<G: Gateway> Console<G> {
    #[must_use]
    pub fn new(gateway: G, options: ConsoleOptions) -> Self {
        Self::with_shared(Arc::new(gateway), options)
    }

    /// Build a console over a gateway the caller keeps a handle to.
    #[must_use]
    pub fn with_shared(gateway: Arc<G>, options: ConsoleOptions) -> Self {
        let store = Arc::new(Store::new(FilterState::with_row_limit(
            options.default_row_limit,
        )));
        let fetch = FetchOrchestrator::new(
            Arc::clone(&gateway),
            Arc::clone(&store),
            options.cancel_superseded,
        );
        let mutation =
            MutationCoordinator::new(Arc::clone(&gateway), Arc::clone(&store), fetch.clone());
        let ml = MlController::new(gateway, Arc::clone(&store), options.cancel_superseded);
        Self {
            store,
            fetch,
            mutation,
            ml,
            excluded_features: options.excluded_features,
        }
    }

    /// Apply one operator action.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn handle(&self, event: ConsoleEvent) -> EventEffect {
        debug!(?event, "console event");
        match event {
            ConsoleEvent::SetDate(date) => self
                .set_date(date)
                .map_or(EventEffect::Unchanged, EventEffect::Issued),
            ConsoleEvent::SetRowLimit(limit) => self
                .set_row_limit(limit)
                .map_or(EventEffect::Unchanged, EventEffect::Issued),
            ConsoleEvent::Refresh => EventEffect::Issued(self.refresh()),
            ConsoleEvent::Submit(transaction) => match self.submit(&transaction).await {
                Ok(pending) => EventEffect::Issued(pending),
                Err(error) => EventEffect::Rejected(error),
            },
            ConsoleEvent::RunForecast => EventEffect::Issued(self.run_forecast()),
            ConsoleEvent::RunClassification => EventEffect::Issued(self.run_classification()),
            ConsoleEvent::SelectProduct(product) => {
                if self.select_product(&product) {
                    EventEffect::Selected
                } else {
                    EventEffect::Unchanged
                }
            }
        }
    }

    /// Change the date filter, refreshing only if it actually changed.
    pub fn set_date(&self, date: Option<NaiveDate>) -> Option<PendingQuery> {
        self.fetch.change_filter(|filter| filter.set_date(date))
    }

    /// Change the row limit, refreshing only if it actually changed.
    pub fn set_row_limit(&self, row_limit: RowLimit) -> Option<PendingQuery> {
        self.fetch.change_filter(|filter| filter.set_row_limit(row_limit))
    }

    /// Re-read inventory and transactions for the current filter.
    pub fn refresh(&self) -> PendingQuery {
        self.fetch.refresh_current()
    }

    /// Record a transaction and re-read on success.
    ///
    /// # Errors
    ///
    /// See [`MutationCoordinator::submit`].
    pub async fn submit(&self, transaction: &NewTransaction) -> Result<PendingQuery, SyncError> {
        self.mutation.submit(transaction).await
    }

    pub fn run_forecast(&self) -> PendingQuery {
        self.ml.run_forecast()
    }

    pub fn run_classification(&self) -> PendingQuery {
        self.ml.run_classification()
    }

    /// Select a product of the current classification.
    pub fn select_product(&self, product: &str) -> bool {
        self.store.select_product(product)
    }

    #[must_use]
    pub fn snapshot(&self) -> ConsoleSnapshot {
        self.store.snapshot()
    }

    #[must_use]
    pub fn filter(&self) -> FilterState {
        self.store.filter()
    }

    /// Ranked feature importances of the selected product, with the
    /// configured exclusions applied. Empty when nothing is selected.
    #[must_use]
    pub fn feature_view(&self) -> Vec<FeatureImportance> {
        self.store.read(|state| {
            view::selected_product_view(
                state.classification.as_ref(),
                state.selected_product.as_deref(),
            )
            .map(|product| view::sorted_feature_importance(product, &self.excluded_features))
            .unwrap_or_default()
        })
    }

    #[must_use]
    pub fn summary(&self) -> SummaryCounts {
        self.store
            .read(|state| view::summary_counts(&state.inventory, &state.transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn options_follow_config() {
        let mut config = ShopConfig::default();
        config.sync.default_row_limit = RowLimit::Five;
        config.sync.cancel_superseded = false;
        config.view.excluded_features = vec!["stock_left".into()];

        let options = ConsoleOptions::from_config(&config);
        assert_eq!(options.default_row_limit, RowLimit::Five);
        assert!(!options.cancel_superseded);
        assert_eq!(
            options.excluded_features,
            BTreeSet::from(["stock_left".to_string()])
        );
    }

    #[test]
    fn default_options_cancel_and_exclude_nothing() {
        let options = ConsoleOptions::default();
        assert_eq!(options.default_row_limit, RowLimit::Twenty);
        assert!(options.cancel_superseded);
        assert!(options.excluded_features.is_empty());
    }
}
