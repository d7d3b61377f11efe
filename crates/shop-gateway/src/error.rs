//! Gateway error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP transport error (connection refused, TLS, reset).
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The gateway returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the gateway.
        status: u16,
        /// Error message from the response body, or the raw body.
        message: String,
    },

    /// Failed to parse a gateway response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response parsed but breaks the contract (duplicate products, empty
    /// feature names).
    #[error("contract violation: {0}")]
    Contract(String),

    /// The model endpoint answered but could not produce a result.
    #[error("model error: {0}")]
    Model(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Parse(error.to_string())
        } else {
            Self::Http(error)
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
