//! Cross-cutting error types for SmartShop.
//!
//! Transport and synchronization errors live in their own crates
//! (`GatewayError`, `SyncError`). This module only covers values that fail
//! local validation before anything is sent.

use thiserror::Error;

/// Errors raised while validating operator input or backend payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A date string did not match the expected calendar format.
    #[error("Invalid date '{input}': expected {expected}")]
    InvalidDate { input: String, expected: &'static str },

    /// A row limit outside the selectable options.
    #[error("Invalid row limit {0}: expected one of 5, 10, 20, 50, 100")]
    InvalidRowLimit(u32),

    /// A transaction kind the console does not know.
    #[error("Unknown transaction type '{0}'")]
    UnknownTransactionKind(String),

    /// Data failed validation (empty names, non-positive quantities, duplicates).
    #[error("Validation error: {0}")]
    Validation(String),
}
