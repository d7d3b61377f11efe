//! Backend gateway connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default gateway address, matching the development backend.
fn default_base_url() -> String {
    String::from("http://127.0.0.1:8000")
}

/// Default request timeout.
const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    String::from("smartshop-console/0.1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Scheme, host, and port of the gateway. No trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Zero disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl BackendConfig {
    /// Base URL without a trailing slash, ready for path concatenation.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Timeout as a `Duration`, or `None` when disabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<std::time::Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(std::time::Duration::from_secs(self.timeout_secs))
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let url = self.normalized_base_url();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".into(),
                reason: "must not be empty".into(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".into(),
                reason: format!("'{url}' must start with http:// or https://"),
            });
        }
        Ok(())
    }
}
