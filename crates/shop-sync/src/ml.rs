//! On-demand forecast and classification runs.
//!
//! Each run clears its previous result and error when issued. The running
//! indicator is derived from the two slots, see
//! [`ConsoleSnapshot::ml_running`](crate::store::ConsoleSnapshot::ml_running).

use std::sync::Arc;

use shop_core::entities::ClassificationResult;
use shop_gateway::Gateway;
use tracing::{debug, warn};

use crate::error::{Concern, SyncError};
use crate::fetch::{ReadError, guarded};
use crate::query::{LogicalQuery, PendingQuery, QueryOutcome};
use crate::store::{ConsoleState, Store};

#[derive(Debug)]
pub struct MlController<G> {
    gateway: Arc<G>,
    store: Arc<Store>,
    cancel_superseded: bool,
}

impl<G: Gateway> MlController<G> {
    #[must_use]
    pub const fn new(gateway: Arc<G>, store: Arc<Store>, cancel_superseded: bool) -> Self {
        Self {
            gateway,
            store,
            cancel_superseded,
        }
    }

    /// Start a forecast run, superseding any run in flight.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn run_forecast(&self) -> PendingQuery {
        let [issued] = self.store.issue(
            [LogicalQuery::Forecast],
            Concern::Forecast,
            self.cancel_superseded,
            |state| state.forecast.clear(),
        );
        let tickets = vec![issued.ticket];
        debug!(generation = %issued.ticket.generation, "running forecast");

        let gateway = Arc::clone(&self.gateway);
        let store = Arc::clone(&self.store);
        let task = tokio::spawn(async move {
            let ticket = [issued.ticket];
            match guarded(&issued.cancel, gateway.forecast()).await {
                Ok(entries) => {
                    QueryOutcome::settled(store.commit(&ticket, |state| state.forecast = entries))
                }
                Err(ReadError::Cancelled) => QueryOutcome::Superseded,
                Err(ReadError::Gateway(error)) => {
                    let failure = SyncError::backend(Concern::Forecast, &error);
                    if store.fail(&ticket, failure.clone(), |state| state.forecast.clear()) {
                        warn!(error = %error, "forecast run failed");
                        QueryOutcome::Failed(failure)
                    } else {
                        QueryOutcome::Superseded
                    }
                }
            }
        });
        PendingQuery::new(tickets, task)
    }

    /// Start a classification run, superseding any run in flight.
    ///
    /// On success the selection is kept if the new result still contains it,
    /// otherwise it moves to the first product.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn run_classification(&self) -> PendingQuery {
        let [issued] = self.store.issue(
            [LogicalQuery::Classification],
            Concern::Classification,
            self.cancel_superseded,
            |state| state.classification = None,
        );
        let tickets = vec![issued.ticket];
        debug!(generation = %issued.ticket.generation, "running classification");

        let gateway = Arc::clone(&self.gateway);
        let store = Arc::clone(&self.store);
        let task = tokio::spawn(async move {
            let ticket = [issued.ticket];
            match guarded(&issued.cancel, gateway.classify()).await {
                Ok(result) => QueryOutcome::settled(
                    store.commit(&ticket, |state| apply_classification(state, result)),
                ),
                Err(ReadError::Cancelled) => QueryOutcome::Superseded,
                Err(ReadError::Gateway(error)) => {
                    let failure = SyncError::backend(Concern::Classification, &error);
                    if store.fail(&ticket, failure.clone(), |state| state.classification = None) {
                        warn!(error = %error, "classification run failed");
                        QueryOutcome::Failed(failure)
                    } else {
                        QueryOutcome::Superseded
                    }
                }
            }
        });
        PendingQuery::new(tickets, task)
    }
}

fn apply_classification(state: &mut ConsoleState, result: ClassificationResult) {
    let keep = state
        .selected_product
        .as_deref()
        .is_some_and(|product| result.contains(product));
    if !keep {
        state.selected_product = result.first_product().map(str::to_string);
    }
    state.classification = Some(result);
}
