//! Shared console state and the generation gate in front of it.
//!
//! Every write to [`ConsoleState`] goes through [`Store`], which holds the
//! state and the per-query slots behind one mutex. A response is applied only
//! if, under that lock, every ticket it carries is still current. The lock is
//! never held across an `.await`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use shop_core::entities::{ClassificationResult, ForecastEntry, InventoryItem, Transaction};
use shop_core::filter::FilterState;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Concern, SyncError};
use crate::query::{LogicalQuery, QueryPhase, QuerySlot, Ticket};

/// Everything the console renders from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsoleState {
    pub filter: FilterState,
    pub inventory: Vec<InventoryItem>,
    pub transactions: Vec<Transaction>,
    pub forecast: Vec<ForecastEntry>,
    pub classification: Option<ClassificationResult>,
    pub selected_product: Option<String>,
    pub errors: BTreeMap<Concern, SyncError>,
}

impl ConsoleState {
    #[must_use]
    pub fn error(&self, concern: Concern) -> Option<&SyncError> {
        self.errors.get(&concern)
    }
}

/// Point-in-time copy of the store for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleSnapshot {
    #[serde(flatten)]
    pub state: ConsoleState,
    pub phases: BTreeMap<LogicalQuery, QueryPhase>,
}

impl ConsoleSnapshot {
    #[must_use]
    pub fn phase(&self, query: LogicalQuery) -> QueryPhase {
        self.phases.get(&query).copied().unwrap_or(QueryPhase::Idle)
    }

    /// Inventory or transaction reads are outstanding.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.is_pending(LogicalQuery::Inventory) || self.is_pending(LogicalQuery::Transactions)
    }

    /// A forecast or classification run is outstanding.
    #[must_use]
    pub fn ml_running(&self) -> bool {
        self.is_pending(LogicalQuery::Forecast) || self.is_pending(LogicalQuery::Classification)
    }

    fn is_pending(&self, query: LogicalQuery) -> bool {
        self.phase(query) == QueryPhase::Pending
    }
}

impl std::ops::Deref for ConsoleSnapshot {
    type Target = ConsoleState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

/// A generation handed out by [`Store::issue`] with the token that cancels
/// its read.
#[derive(Debug, Clone)]
pub struct Issued {
    pub ticket: Ticket,
    pub cancel: CancellationToken,
}

#[derive(Debug, Default)]
struct Inner {
    state: ConsoleState,
    slots: BTreeMap<LogicalQuery, QuerySlot>,
}

impl Inner {
    fn slot(&mut self, query: LogicalQuery) -> &mut QuerySlot {
        self.slots.entry(query).or_default()
    }

    fn all_current(&self, tickets: &[Ticket]) -> bool {
        tickets.iter().all(|ticket| {
            self.slots
                .get(&ticket.query)
                .is_some_and(|slot| slot.is_current(ticket.generation))
        })
    }

    fn issue<const N: usize>(
        &mut self,
        queries: [LogicalQuery; N],
        concern: Concern,
        cancel_previous: bool,
    ) -> [Issued; N] {
        let issued = queries.map(|query| {
            let (generation, cancel) = self.slot(query).issue(cancel_previous);
            debug!(%query, %generation, "issued");
            Issued {
                ticket: Ticket { query, generation },
                cancel,
            }
        });
        self.state.errors.remove(&concern);
        issued
    }

    fn settle(&mut self, tickets: &[Ticket]) {
        for ticket in tickets {
            self.slot(ticket.query).settle(ticket.generation);
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    inner: Mutex<Inner>,
}

impl Store {
    #[must_use]
    pub fn new(filter: FilterState) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: ConsoleState {
                    filter,
                    ..ConsoleState::default()
                },
                slots: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> ConsoleSnapshot {
        let inner = self.lock();
        ConsoleSnapshot {
            state: inner.state.clone(),
            phases: LogicalQuery::ALL
                .into_iter()
                .map(|query| {
                    let phase = inner.slots.get(&query).map_or(QueryPhase::Idle, QuerySlot::phase);
                    (query, phase)
                })
                .collect(),
        }
    }

    /// Run `f` against the state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R {
        f(&self.lock().state)
    }

    #[must_use]
    pub fn filter(&self) -> FilterState {
        self.lock().state.filter
    }

    /// Start a new generation for each of `queries`.
    ///
    /// Clears the previous error of `concern` and runs `on_issue` inside the
    /// same critical section.
    pub fn issue<const N: usize>(
        &self,
        queries: [LogicalQuery; N],
        concern: Concern,
        cancel_previous: bool,
        on_issue: impl FnOnce(&mut ConsoleState),
    ) -> [Issued; N] {
        let mut inner = self.lock();
        let issued = inner.issue(queries, concern, cancel_previous);
        on_issue(&mut inner.state);
        issued
    }

    /// Issue `queries` for the filter left by `set`.
    ///
    /// The filter change and the new generations land in one critical
    /// section, so the latest generation was always issued under the stored
    /// filter.
    pub fn issue_with_filter<const N: usize>(
        &self,
        queries: [LogicalQuery; N],
        concern: Concern,
        cancel_previous: bool,
        set: impl FnOnce(&mut FilterState),
    ) -> (FilterState, [Issued; N]) {
        let mut inner = self.lock();
        set(&mut inner.state.filter);
        let filter = inner.state.filter;
        (filter, inner.issue(queries, concern, cancel_previous))
    }

    /// Like [`Store::issue_with_filter`], but issues nothing when `update`
    /// reports the filter unchanged.
    pub fn update_filter_and_issue<const N: usize>(
        &self,
        queries: [LogicalQuery; N],
        concern: Concern,
        cancel_previous: bool,
        update: impl FnOnce(&mut FilterState) -> bool,
    ) -> Option<(FilterState, [Issued; N])> {
        let mut inner = self.lock();
        if !update(&mut inner.state.filter) {
            return None;
        }
        let filter = inner.state.filter;
        Some((filter, inner.issue(queries, concern, cancel_previous)))
    }

    /// Apply a successful response if all of `tickets` are still current.
    ///
    /// Returns `false`, leaving the state untouched, when any is stale.
    pub fn commit(&self, tickets: &[Ticket], apply: impl FnOnce(&mut ConsoleState)) -> bool {
        let mut inner = self.lock();
        if !inner.all_current(tickets) {
            debug!(?tickets, "discarding superseded response");
            return false;
        }
        inner.settle(tickets);
        apply(&mut inner.state);
        true
    }

    /// Record a failed read if all of `tickets` are still current.
    ///
    /// `clear` drops the affected data; `error` takes its concern's slot.
    pub fn fail(
        &self,
        tickets: &[Ticket],
        error: SyncError,
        clear: impl FnOnce(&mut ConsoleState),
    ) -> bool {
        let mut inner = self.lock();
        if !inner.all_current(tickets) {
            debug!(?tickets, "discarding superseded failure");
            return false;
        }
        inner.settle(tickets);
        clear(&mut inner.state);
        if let Some(concern) = error.concern() {
            inner.state.errors.insert(concern, error);
        }
        true
    }

    /// Surface an error outside any generation (mutations).
    pub fn set_error(&self, error: SyncError) {
        if let Some(concern) = error.concern() {
            self.lock().state.errors.insert(concern, error);
        }
    }

    pub fn clear_error(&self, concern: Concern) {
        self.lock().state.errors.remove(&concern);
    }

    /// Select a product of the current classification.
    ///
    /// Returns `false` and keeps the selection when `product` is not part of
    /// it.
    pub fn select_product(&self, product: &str) -> bool {
        let mut inner = self.lock();
        let known = inner
            .state
            .classification
            .as_ref()
            .is_some_and(|result| result.contains(product));
        if known {
            inner.state.selected_product = Some(product.to_string());
        }
        known
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::enums::RowLimit;

    fn data_tickets(store: &Store) -> [Issued; 2] {
        store.issue(
            [LogicalQuery::Inventory, LogicalQuery::Transactions],
            Concern::Data,
            true,
            |_| {},
        )
    }

    #[test]
    fn new_store_starts_idle_with_filter() {
        let store = Store::new(FilterState::with_row_limit(RowLimit::Fifty));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.filter.row_limit(), RowLimit::Fifty);
        assert!(!snapshot.loading());
        assert!(!snapshot.ml_running());
    }

    #[test]
    fn issue_marks_loading_and_clears_concern_error() {
        let store = Store::default();
        store.set_error(SyncError::Backend {
            concern: Concern::Data,
            message: Concern::Data.banner().into(),
            detail: "boom".into(),
        });
        let _ = data_tickets(&store);
        let snapshot = store.snapshot();
        assert!(snapshot.loading());
        assert!(snapshot.error(Concern::Data).is_none());
    }

    #[test]
    fn stale_commit_is_rejected() {
        let store = Store::default();
        let old = data_tickets(&store);
        let new = data_tickets(&store);
        let old_tickets = [old[0].ticket, old[1].ticket];
        let new_tickets = [new[0].ticket, new[1].ticket];

        assert!(!store.commit(&old_tickets, |s| s.inventory = vec![InventoryItem::new("Old", 1)]));
        assert!(store.read(|s| s.inventory.is_empty()));
        assert!(store.snapshot().loading());

        assert!(store.commit(&new_tickets, |s| s.inventory = vec![InventoryItem::new("New", 2)]));
        assert_eq!(store.read(|s| s.inventory[0].product.clone()), "New");
        assert!(!store.snapshot().loading());
    }

    #[test]
    fn fail_sets_one_error_for_the_concern() {
        let store = Store::default();
        let issued = data_tickets(&store);
        let tickets = [issued[0].ticket, issued[1].ticket];
        let error = SyncError::Backend {
            concern: Concern::Data,
            message: Concern::Data.banner().into(),
            detail: "down".into(),
        };
        assert!(store.fail(&tickets, error.clone(), |s| s.inventory.clear()));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.errors.len(), 1);
        assert_eq!(snapshot.error(Concern::Data), Some(&error));
    }

    #[test]
    fn unchanged_filter_issues_nothing() {
        let store = Store::default();
        let issued = store.update_filter_and_issue(
            [LogicalQuery::Inventory, LogicalQuery::Transactions],
            Concern::Data,
            true,
            |filter| filter.set_row_limit(RowLimit::Twenty),
        );
        assert!(issued.is_none());
        assert!(!store.snapshot().loading());
    }

    #[test]
    fn filter_change_and_issue_share_one_section() {
        let store = Store::default();
        let (filter, issued) = store
            .update_filter_and_issue(
                [LogicalQuery::Inventory, LogicalQuery::Transactions],
                Concern::Data,
                true,
                |filter| filter.set_row_limit(RowLimit::Five),
            )
            .unwrap();
        assert_eq!(filter.row_limit(), RowLimit::Five);
        assert_eq!(store.filter(), filter);
        assert_eq!(issued[0].ticket.generation.get(), 1);
        assert!(store.snapshot().loading());

        let (filter, issued) = store.issue_with_filter(
            [LogicalQuery::Inventory, LogicalQuery::Transactions],
            Concern::Data,
            true,
            |filter| *filter = FilterState::with_row_limit(RowLimit::Hundred),
        );
        assert_eq!(store.filter(), filter);
        assert_eq!(issued[1].ticket.generation.get(), 2);
    }

    #[test]
    fn select_product_requires_a_classified_product() {
        let store = Store::default();
        assert!(!store.select_product("Rice"));
        store.commit(&[], |s| {
            s.classification = Some(ClassificationResult {
                overall_accuracy: 0.9,
                products: Vec::new(),
            });
        });
        assert!(!store.select_product("Rice"));
        assert_eq!(store.read(|s| s.selected_product.clone()), None);
    }
}
