//! # shop-gateway
//!
//! HTTP client for the SmartShop backend gateway.
//!
//! Covers every route the console talks to:
//! - `GET /data/inventory` and `GET /data/transactions` (filtered reads)
//! - `POST /data/transaction` (record a buy/sell)
//! - `GET /predict/forecast` and `GET /predict/classify` (model runs)
//! - `GET /data/weekly-summary` and `GET /` (reporting and health)
//!
//! The read/write/model routes are also exposed through the [`Gateway`] trait
//! so the synchronization layer can run against an in-memory double.

pub mod data;
pub mod predict;
pub mod status;

mod error;
mod http;

pub use error::GatewayError;
pub use status::HealthStatus;

use std::future::Future;

use shop_config::{BackendConfig, EndpointConfig};
use shop_core::entities::{
    ClassificationResult, ForecastEntry, InventoryItem, NewTransaction, Transaction,
};
use shop_core::filter::{InventoryQuery, TransactionQuery};

// ── Contract ───────────────────────────────────────────────────────

/// Backend operations the console synchronizes against.
///
/// Implementations must be cheap to share; the console holds one behind an
/// `Arc` and calls it from spawned tasks.
pub trait Gateway: Send + Sync + 'static {
    /// Read the inventory snapshot, optionally for one date.
    fn inventory(
        &self,
        query: &InventoryQuery,
    ) -> impl Future<Output = Result<Vec<InventoryItem>, GatewayError>> + Send;

    /// Read recent transactions.
    fn transactions(
        &self,
        query: &TransactionQuery,
    ) -> impl Future<Output = Result<Vec<Transaction>, GatewayError>> + Send;

    /// Record a new transaction. Only the status is meaningful.
    fn record_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Run the sales forecast model.
    fn forecast(&self) -> impl Future<Output = Result<Vec<ForecastEntry>, GatewayError>> + Send;

    /// Run the sales-performance classifier.
    fn classify(&self) -> impl Future<Output = Result<ClassificationResult, GatewayError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// reqwest-backed client for the backend gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    endpoints: EndpointConfig,
}

impl HttpGateway {
    /// Create a client from backend and endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(backend: &BackendConfig, endpoints: &EndpointConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder().user_agent(backend.user_agent.clone());
        if let Some(timeout) = backend.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: backend.normalized_base_url().to_string(),
            endpoints: endpoints.clone(),
        })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> String {
        http::build_url(&self.base_url, path, params)
    }
}

impl Gateway for HttpGateway {
    fn inventory(
        &self,
        query: &InventoryQuery,
    ) -> impl Future<Output = Result<Vec<InventoryItem>, GatewayError>> + Send {
        self.fetch_inventory(query)
    }

    fn transactions(
        &self,
        query: &TransactionQuery,
    ) -> impl Future<Output = Result<Vec<Transaction>, GatewayError>> + Send {
        self.fetch_transactions(query)
    }

    fn record_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send {
        self.post_transaction(transaction)
    }

    fn forecast(&self) -> impl Future<Output = Result<Vec<ForecastEntry>, GatewayError>> + Send {
        self.run_forecast()
    }

    fn classify(&self) -> impl Future<Output = Result<ClassificationResult, GatewayError>> + Send {
        self.run_classification()
    }
}
