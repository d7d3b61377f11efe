//! Error taxonomy surfaced to the console.
//!
//! Every asynchronous operation maps its failure into exactly one
//! [`SyncError`] variant. Raw [`GatewayError`]s never reach the view; their
//! text is kept as `detail` for logs and verbose output.

use std::fmt;

use serde::Serialize;
use shop_gateway::GatewayError;
use thiserror::Error;

/// Independent error slots. At most one error is held per concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Concern {
    /// Inventory and transaction reads.
    Data,
    /// Transaction writes.
    Mutation,
    Forecast,
    Classification,
}

impl Concern {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Mutation => "mutation",
            Self::Forecast => "forecast",
            Self::Classification => "classification",
        }
    }

    /// Banner text shown when a request for this concern fails.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::Data => "Failed to fetch data from backend.",
            Self::Mutation => "Failed to record transaction.",
            Self::Forecast => "Failed to fetch forecast data from backend.",
            Self::Classification => "Failed to fetch classification data from backend.",
        }
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncError {
    /// A newer request superseded this one. Never shown to the operator.
    #[error("request cancelled")]
    Cancelled,

    /// The backend was unreachable or answered with an error.
    #[error("{message}")]
    Backend {
        concern: Concern,
        message: String,
        detail: String,
    },

    /// A transaction write was rejected locally or by the backend.
    #[error("{message}")]
    Mutation { message: String, detail: String },
}

impl SyncError {
    /// Map a gateway failure for a read concern.
    #[must_use]
    pub fn backend(concern: Concern, error: &GatewayError) -> Self {
        Self::Backend {
            concern,
            message: concern.banner().to_string(),
            detail: error.to_string(),
        }
    }

    /// Map a failed or invalid write.
    #[must_use]
    pub fn mutation(detail: impl fmt::Display) -> Self {
        Self::Mutation {
            message: Concern::Mutation.banner().to_string(),
            detail: detail.to_string(),
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The concern whose error slot this error occupies.
    #[must_use]
    pub const fn concern(&self) -> Option<Concern> {
        match self {
            Self::Cancelled => None,
            Self::Backend { concern, .. } => Some(*concern),
            Self::Mutation { .. } => Some(Concern::Mutation),
        }
    }

    /// Underlying cause, for logs and verbose output.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Cancelled => None,
            Self::Backend { detail, .. } | Self::Mutation { detail, .. } => Some(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_shows_banner_and_keeps_detail() {
        let err = SyncError::backend(
            Concern::Data,
            &GatewayError::Api {
                status: 404,
                message: "No inventory data found".into(),
            },
        );
        assert_eq!(err.to_string(), "Failed to fetch data from backend.");
        assert_eq!(err.detail(), Some("API error (404): No inventory data found"));
        assert_eq!(err.concern(), Some(Concern::Data));
    }

    #[test]
    fn mutation_error_is_its_own_concern() {
        let err = SyncError::mutation("quantity must be greater than zero");
        assert_eq!(err.concern(), Some(Concern::Mutation));
        assert_eq!(err.to_string(), "Failed to record transaction.");
    }

    #[test]
    fn cancelled_has_no_concern() {
        assert!(SyncError::Cancelled.is_cancelled());
        assert_eq!(SyncError::Cancelled.concern(), None);
        assert_eq!(SyncError::Cancelled.detail(), None);
    }
}
