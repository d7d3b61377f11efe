//! Shared HTTP response helpers for gateway calls.
//!
//! Centralizes the non-success → [`GatewayError::Api`] mapping so the
//! endpoint modules stay focused on request construction and response
//! mapping. The backend reports failures as `{"error": "..."}` (or FastAPI's
//! `{"detail": ...}` for rejected parameters); that message is preferred over
//! the raw body.

use crate::error::GatewayError;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, GatewayError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(GatewayError::Api {
        status,
        message: error_message(&body),
    })
}

/// Extract a human-readable message from an error body.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    match value.get("error").or_else(|| value.get("detail")) {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}

/// Join a base URL, a path, and percent-encoded query parameters.
pub fn build_url(base_url: &str, path: &str, params: &[(&str, String)]) -> String {
    let mut url = format!("{base_url}{path}");
    if !params.is_empty() {
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&query);
    }
    url
}
