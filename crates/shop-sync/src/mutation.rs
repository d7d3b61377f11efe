//! Transaction writes with read-after-write.

use std::sync::Arc;

use shop_core::entities::NewTransaction;
use shop_gateway::Gateway;
use tracing::{info, warn};

use crate::error::{Concern, SyncError};
use crate::fetch::FetchOrchestrator;
use crate::query::PendingQuery;
use crate::store::Store;

/// Sends transaction writes and re-reads once each succeeds.
///
/// Nothing is applied optimistically: the table changes only when the
/// follow-up refresh commits.
#[derive(Debug)]
pub struct MutationCoordinator<G> {
    gateway: Arc<G>,
    store: Arc<Store>,
    fetch: FetchOrchestrator<G>,
}

impl<G: Gateway> MutationCoordinator<G> {
    #[must_use]
    pub const fn new(gateway: Arc<G>, store: Arc<Store>, fetch: FetchOrchestrator<G>) -> Self {
        Self {
            gateway,
            store,
            fetch,
        }
    }

    /// Record `transaction`, then refresh with the filter current at that
    /// moment.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Mutation`] if the input is invalid or the backend
    /// rejects the write. Inventory and transactions are left untouched and
    /// the same error is placed in the mutation slot.
    pub async fn submit(&self, transaction: &NewTransaction) -> Result<PendingQuery, SyncError> {
        self.store.clear_error(Concern::Mutation);

        if let Err(invalid) = transaction.validate() {
            return Err(self.reject(SyncError::mutation(invalid)));
        }

        if let Err(error) = self.gateway.record_transaction(transaction).await {
            warn!(product = %transaction.product, error = %error, "transaction rejected");
            return Err(self.reject(SyncError::mutation(error)));
        }

        info!(
            product = %transaction.product,
            quantity = transaction.quantity,
            kind = %transaction.kind,
            "transaction recorded"
        );
        Ok(self.fetch.refresh_current())
    }

    fn reject(&self, error: SyncError) -> SyncError {
        self.store.set_error(error.clone());
        error
    }
}
