//! Inventory, transaction, and weekly-summary routes.

use shop_core::entities::{
    InventoryItem, NewTransaction, Transaction, WeeklySummary, ensure_unique_products,
};
use shop_core::filter::{InventoryQuery, TransactionQuery, WeeklyQuery};

use crate::{HttpGateway, error::GatewayError, http::check_response};

impl HttpGateway {
    /// `GET /data/inventory`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails, the gateway returns a
    /// non-success status, the body cannot be parsed, or the snapshot lists a
    /// product twice.
    pub async fn fetch_inventory(
        &self,
        query: &InventoryQuery,
    ) -> Result<Vec<InventoryItem>, GatewayError> {
        let url = self.url(&self.endpoints.inventory, &query.params());
        tracing::debug!(%url, "fetching inventory");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let items: Vec<InventoryItem> = resp.json().await?;
        ensure_unique_products(&items).map_err(|e| GatewayError::Contract(e.to_string()))?;
        Ok(items)
    }

    /// `GET /data/transactions`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails, the gateway returns a
    /// non-success status, or the body cannot be parsed.
    pub async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, GatewayError> {
        let url = self.url(&self.endpoints.transactions, &query.params());
        tracing::debug!(%url, "fetching transactions");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// `POST /data/transaction`.
    ///
    /// The response body is ignored; a success status means the write landed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the gateway returns a
    /// non-success status.
    pub async fn post_transaction(&self, transaction: &NewTransaction) -> Result<(), GatewayError> {
        let url = self.url(&self.endpoints.record_transaction, &[]);
        tracing::debug!(%url, product = %transaction.product, kind = %transaction.kind, "recording transaction");
        let body = serde_json::to_vec(transaction)?;
        let request = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        check_response(request.send().await?).await?;
        Ok(())
    }

    /// `GET /data/weekly-summary`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails, the gateway returns a
    /// non-success status (e.g. a week past the data cutoff), or the body
    /// cannot be parsed.
    pub async fn weekly_summary(&self, query: &WeeklyQuery) -> Result<WeeklySummary, GatewayError> {
        let url = self.url(&self.endpoints.weekly_summary, &query.params());
        let resp = check_response(self.http.get(&url).send().await?).await?;
        Ok(resp.json().await?)
    }
}
