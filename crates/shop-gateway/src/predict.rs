//! Model-run routes: forecast and classification.
//!
//! The classifier answers `200` with `{"classification": {"error": ...}}`
//! when it had too little data to train. That shape is surfaced as
//! [`GatewayError::Model`] rather than an empty result.

use serde::Deserialize;
use shop_core::entities::{ClassificationResult, ForecastEntry};

use crate::{HttpGateway, error::GatewayError, http::check_response};

#[derive(Deserialize)]
struct ForecastEnvelope {
    #[serde(default)]
    forecast: Vec<ForecastEntry>,
}

#[derive(Deserialize)]
struct ClassifyEnvelope {
    classification: serde_json::Value,
}

impl HttpGateway {
    /// `GET /predict/forecast`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails, the gateway returns a
    /// non-success status, or the body cannot be parsed.
    pub async fn run_forecast(&self) -> Result<Vec<ForecastEntry>, GatewayError> {
        let url = self.url(&self.endpoints.forecast, &[]);
        tracing::debug!(%url, "running forecast");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let text = resp.text().await?;
        parse_forecast(&text)
    }

    /// `GET /predict/classify`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails, the gateway returns a
    /// non-success status, the body cannot be parsed, the model reports an
    /// error, or a product lists an empty feature name.
    pub async fn run_classification(&self) -> Result<ClassificationResult, GatewayError> {
        let url = self.url(&self.endpoints.classify, &[]);
        tracing::debug!(%url, "running classification");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let text = resp.text().await?;
        parse_classification(&text)
    }
}

fn parse_forecast(body: &str) -> Result<Vec<ForecastEntry>, GatewayError> {
    let envelope: ForecastEnvelope = serde_json::from_str(body)?;
    Ok(envelope.forecast)
}

fn parse_classification(body: &str) -> Result<ClassificationResult, GatewayError> {
    let envelope: ClassifyEnvelope = serde_json::from_str(body)?;
    if let Some(error) = envelope.classification.get("error") {
        let message = error
            .as_str()
            .map_or_else(|| error.to_string(), str::to_string);
        return Err(GatewayError::Model(message));
    }
    let result: ClassificationResult = serde_json::from_value(envelope.classification)?;
    if let Some(product) = result
        .products
        .iter()
        .find(|p| p.feature_importance.keys().any(|k| k.trim().is_empty()))
    {
        return Err(GatewayError::Contract(format!(
            "product '{}' has an empty feature name",
            product.product
        )));
    }
    Ok(result)
}
