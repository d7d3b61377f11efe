//! Health check route.

use serde::{Deserialize, Serialize};

use crate::{HttpGateway, error::GatewayError, http::check_response};

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub message: String,
}

impl HttpGateway {
    /// Ping the gateway root.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the gateway is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthStatus, GatewayError> {
        let url = self.url(&self.endpoints.health, &[]);
        let resp = check_response(self.http.get(&url).send().await?).await?;
        Ok(resp.json().await?)
    }
}
