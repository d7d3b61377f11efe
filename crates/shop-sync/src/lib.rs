//! # shop-sync
//!
//! Data synchronization and view derivation for the SmartShop console.
//!
//! Four logical queries (inventory, transactions, forecast, classification)
//! each carry a generation counter and a cancel handle. Issuing a query bumps
//! its generation; a response mutates shared state only if its generation is
//! still current when it arrives, so the most recently issued read always
//! wins regardless of arrival order.
//!
//! - [`FetchOrchestrator`] reads inventory and transactions for the filter
//! - [`MutationCoordinator`] records a transaction, then refreshes once
//! - [`MlController`] runs the forecast and classification models
//! - [`view`] holds the pure derivations the console renders
//!
//! [`Console`] wires them together behind one event entry point.

pub mod console;
pub mod error;
pub mod fetch;
pub mod ml;
pub mod mutation;
pub mod query;
pub mod store;
pub mod view;

pub use console::{Console, ConsoleEvent, ConsoleOptions, EventEffect};
pub use error::{Concern, SyncError};
pub use fetch::FetchOrchestrator;
pub use ml::MlController;
pub use mutation::MutationCoordinator;
pub use query::{Generation, LogicalQuery, PendingQuery, QueryOutcome, QueryPhase, Ticket};
pub use store::{ConsoleSnapshot, ConsoleState, Store};
pub use view::{FeatureImportance, SummaryCounts};
