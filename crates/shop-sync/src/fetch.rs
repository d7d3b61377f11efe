//! Inventory and transaction reads driven by the filter.

use std::future::Future;
use std::sync::Arc;

use shop_core::filter::FilterState;
use shop_gateway::{Gateway, GatewayError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Concern, SyncError};
use crate::query::{LogicalQuery, PendingQuery, QueryOutcome};
use crate::store::{Issued, Store};

const DATA_QUERIES: [LogicalQuery; 2] = [LogicalQuery::Inventory, LogicalQuery::Transactions];

/// Why a guarded read produced no value.
#[derive(Debug)]
pub(crate) enum ReadError {
    Cancelled,
    Gateway(GatewayError),
}

/// Run `read` until it finishes or `cancel` fires.
pub(crate) async fn guarded<T>(
    cancel: &CancellationToken,
    read: impl Future<Output = Result<T, GatewayError>>,
) -> Result<T, ReadError> {
    match cancel.run_until_cancelled(read).await {
        Some(Ok(value)) => Ok(value),
        Some(Err(error)) => Err(ReadError::Gateway(error)),
        None => Err(ReadError::Cancelled),
    }
}

/// Issues the paired inventory and transaction reads.
///
/// Both reads share one outcome: they commit together, fail together, and
/// are superseded together.
#[derive(Debug)]
pub struct FetchOrchestrator<G> {
    gateway: Arc<G>,
    store: Arc<Store>,
    cancel_superseded: bool,
}

impl<G> Clone for FetchOrchestrator<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            store: Arc::clone(&self.store),
            cancel_superseded: self.cancel_superseded,
        }
    }
}

impl<G: Gateway> FetchOrchestrator<G> {
    #[must_use]
    pub const fn new(gateway: Arc<G>, store: Arc<Store>, cancel_superseded: bool) -> Self {
        Self {
            gateway,
            store,
            cancel_superseded,
        }
    }

    /// Store `filter` and read inventory and transactions for it,
    /// superseding any read still in flight.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn refresh(&self, filter: &FilterState) -> PendingQuery {
        let (filter, issued) = self.store.issue_with_filter(
            DATA_QUERIES,
            Concern::Data,
            self.cancel_superseded,
            |current| *current = *filter,
        );
        self.spawn_reads(filter, issued)
    }

    /// Re-read for whatever filter is stored when the reads are issued.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn refresh_current(&self) -> PendingQuery {
        let (filter, issued) = self.store.issue_with_filter(
            DATA_QUERIES,
            Concern::Data,
            self.cancel_superseded,
            |_| {},
        );
        self.spawn_reads(filter, issued)
    }

    /// Apply `update` to the stored filter and read for the result.
    ///
    /// Returns `None`, issuing nothing, when `update` reports no change.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn change_filter(
        &self,
        update: impl FnOnce(&mut FilterState) -> bool,
    ) -> Option<PendingQuery> {
        let (filter, issued) = self.store.update_filter_and_issue(
            DATA_QUERIES,
            Concern::Data,
            self.cancel_superseded,
            update,
        )?;
        Some(self.spawn_reads(filter, issued))
    }

    fn spawn_reads(&self, filter: FilterState, issued: [Issued; 2]) -> PendingQuery {
        let [inventory, transactions] = issued;
        let inventory_query = filter.inventory_query();
        let transaction_query = filter.transaction_query();
        let tickets = vec![inventory.ticket, transactions.ticket];
        debug!(
            generation = %inventory.ticket.generation,
            date = ?inventory_query.date,
            limit = transaction_query.limit,
            "refreshing inventory and transactions"
        );

        let gateway = Arc::clone(&self.gateway);
        let store = Arc::clone(&self.store);
        let task_tickets = tickets.clone();
        let task = tokio::spawn(async move {
            let result = tokio::try_join!(
                guarded(&inventory.cancel, gateway.inventory(&inventory_query)),
                guarded(&transactions.cancel, gateway.transactions(&transaction_query)),
            );
            match result {
                Ok((items, rows)) => {
                    QueryOutcome::settled(store.commit(&task_tickets, |state| {
                        state.inventory = items;
                        state.transactions = rows;
                    }))
                }
                Err(ReadError::Cancelled) => QueryOutcome::Superseded,
                Err(ReadError::Gateway(error)) => {
                    let failure = SyncError::backend(Concern::Data, &error);
                    let applied = store.fail(&task_tickets, failure.clone(), |state| {
                        state.inventory.clear();
                        state.transactions.clear();
                    });
                    if applied {
                        warn!(error = %error, "data refresh failed");
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
