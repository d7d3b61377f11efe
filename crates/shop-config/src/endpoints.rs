//! Endpoint paths of the backend gateway.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_inventory() -> String {
    String::from("/data/inventory")
}

fn default_transactions() -> String {
    String::from("/data/transactions")
}

fn default_record_transaction() -> String {
    String::from("/data/transaction")
}

fn default_weekly_summary() -> String {
    String::from("/data/weekly-summary")
}

fn default_forecast() -> String {
    String::from("/predict/forecast")
}

fn default_classify() -> String {
    String::from("/predict/classify")
}

fn default_health() -> String {
    String::from("/")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    #[serde(default = "default_inventory")]
    pub inventory: String,

    #[serde(default = "default_transactions")]
    pub transactions: String,

    /// Write endpoint for new transactions (POST).
    #[serde(default = "default_record_transaction")]
    pub record_transaction: String,

    #[serde(default = "default_weekly_summary")]
    pub weekly_summary: String,

    #[serde(default = "default_forecast")]
    pub forecast: String,

    #[serde(default = "default_classify")]
    pub classify: String,

    #[serde(default = "default_health")]
    pub health: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            inventory: default_inventory(),
            transactions: default_transactions(),
            record_transaction: default_record_transaction(),
            weekly_summary: default_weekly_summary(),
            forecast: default_forecast(),
            classify: default_classify(),
            health: default_health(),
        }
    }
}

impl EndpointConfig {
    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("endpoints.inventory", &self.inventory),
            ("endpoints.transactions", &self.transactions),
            ("endpoints.record_transaction", &self.record_transaction),
            ("endpoints.weekly_summary", &self.weekly_summary),
            ("endpoints.forecast", &self.forecast),
            ("endpoints.classify", &self.classify),
            ("endpoints.health", &self.health),
        ]
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, path) in self.entries() {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("path '{path}' must start with '/'"),
                });
            }
        }
        Ok(())
    }
}
