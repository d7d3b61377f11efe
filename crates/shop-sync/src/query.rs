//! Logical queries, generation tokens, and per-query slots.
//!
//! Each logical query owns one [`QuerySlot`]: the latest issued
//! [`Generation`] and the cancel handle of the read carrying it. A response
//! may only mutate shared state while its generation is still the slot's
//! current one.
//!
//! ```text
//! Idle → Pending (issue) → Committed   (accepted, generation current)
//!                        → Superseded  (newer issue, discarded on arrival)
//!                        → Failed      (error surfaced)
//!      → Idle
//! ```

use std::fmt;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::SyncError;

/// A named, independently cancellable read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalQuery {
    Inventory,
    Transactions,
    Forecast,
    Classification,
}

impl LogicalQuery {
    pub const ALL: [Self; 4] = [
        Self::Inventory,
        Self::Transactions,
        Self::Forecast,
        Self::Classification,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Transactions => "transactions",
            Self::Forecast => "forecast",
            Self::Classification => "classification",
        }
    }
}

impl fmt::Display for LogicalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonically increasing issue counter. `0` means never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Identifies one issued read: which query, which generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub query: LogicalQuery,
    pub generation: Generation,
}

/// Whether a query has an unsettled generation outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPhase {
    Idle,
    Pending,
}

/// Terminal result of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The response was applied.
    Committed,
    /// A newer issue preempted this one; nothing was applied.
    Superseded,
    /// The error was surfaced and the affected data cleared.
    Failed(SyncError),
}

impl QueryOutcome {
    /// Outcome of a response that was either applied or found stale.
    pub(crate) const fn settled(applied: bool) -> Self {
        if applied {
            Self::Committed
        } else {
            Self::Superseded
        }
    }

    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// Generation counter and cancel handle for one logical query.
#[derive(Debug, Default)]
pub struct QuerySlot {
    current: Generation,
    pending: bool,
    cancel: Option<CancellationToken>,
}

impl QuerySlot {
    /// Start a new generation, invalidating whatever was in flight.
    ///
    /// With `cancel_previous`, the previous read is told to stop; without it
    /// the previous read runs to completion and is discarded on arrival.
    pub fn issue(&mut self, cancel_previous: bool) -> (Generation, CancellationToken) {
        if let Some(previous) = self.cancel.take() {
            if cancel_previous {
                previous.cancel();
            }
        }
        self.current = self.current.next();
        self.pending = true;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        (self.current, token)
    }

    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current == generation
    }

    /// Mark `generation` settled. Returns `false` if it is stale.
    pub fn settle(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.pending = false;
        self.cancel = None;
        true
    }

    #[must_use]
    pub const fn current(&self) -> Generation {
        self.current
    }

    #[must_use]
    pub const fn phase(&self) -> QueryPhase {
        if self.pending {
            QueryPhase::Pending
        } else {
            QueryPhase::Idle
        }
    }
}

/// An issued read whose outcome can be awaited.
///
/// Dropping the handle does not stop the read; only a newer issue does.
#[derive(Debug)]
pub struct PendingQuery {
    tickets: Vec<Ticket>,
    task: JoinHandle<QueryOutcome>,
}

impl PendingQuery {
    pub(crate) const fn new(tickets: Vec<Ticket>, task: JoinHandle<QueryOutcome>) -> Self {
        Self { tickets, task }
    }

    /// The generations this read was issued under.
    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Wait for the read to settle.
    ///
    /// # Panics
    ///
    /// Resumes the panic if the read task panicked.
    pub async fn outcome(self) -> QueryOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(_) => QueryOutcome::Superseded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_slot_is_idle_at_generation_zero() {
        let slot = QuerySlot::default();
        assert_eq!(slot.phase(), QueryPhase::Idle);
        assert_eq!(slot.current().get(), 0);
    }

    #[test]
    fn issue_bumps_generation_and_marks_pending() {
        let mut slot = QuerySlot::default();
        let (g1, _) = slot.issue(true);
        let (g2, _) = slot.issue(true);
        assert!(g2 > g1);
        assert!(!slot.is_current(g1));
        assert!(slot.is_current(g2));
        assert_eq!(slot.phase(), QueryPhase::Pending);
    }

    #[test]
    fn issue_cancels_previous_token_when_asked() {
        let mut slot = QuerySlot::default();
        let (_, first) = slot.issue(true);
        let (_, second) = slot.issue(true);
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn issue_leaves_previous_token_running_otherwise() {
        let mut slot = QuerySlot::default();
        let (_, first) = slot.issue(false);
        let _ = slot.issue(false);
        assert!(!first.is_cancelled());
    }

    #[test]
    fn stale_generation_cannot_settle() {
        let mut slot = QuerySlot::default();
        let (g1, _) = slot.issue(true);
        let (g2, _) = slot.issue(true);
        assert!(!slot.settle(g1));
        assert_eq!(slot.phase(), QueryPhase::Pending);
        assert!(slot.settle(g2));
        assert_eq!(slot.phase(), QueryPhase::Idle);
    }

    #[test]
    fn generation_display() {
        let mut slot = QuerySlot::default();
        let (g, _) = slot.issue(true);
        assert_eq!(g.to_string(), "g1");
    }
}
