use serde_json::Value;
use tracing::{debug, warn};

use crate::{ClientConfig, ClientError, ExplanationRequest, ExplanationResponse};

/// Message used when a failed response carries no usable `detail`.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Talks to the explanation endpoint.
///
/// Exactly one attempt per call: no retry, no timeout, no cancellation. Whatever the service
/// answers on success is returned without schema checks.
#[derive(Debug, Clone)]
pub struct ExplanationClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Default for ExplanationClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl ExplanationClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Reuses a caller-provided `reqwest::Client` (connection pool, proxies, TLS settings).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn explain(
        &self,
        request: &ExplanationRequest,
    ) -> Result<ExplanationResponse, ClientError> {
        let url = self.config.explain_url().clone();
        debug!(
            url = %url,
            concept = request.concept(),
            age = request.age(),
            "requesting explanation"
        );

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Transport)?;

        if !status.is_success() {
            let detail = error_detail(&body);
            warn!(status = status.as_u16(), detail = %detail, "explanation request failed");
            return Err(ClientError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: ExplanationResponse =
            serde_json::from_slice(&body).map_err(ClientError::Decode)?;
        debug!(
            visual_type = %parsed.visual_type,
            explanation_len = parsed.explanation.len(),
            "explanation received"
        );
        Ok(parsed)
    }
}

/// Extracts the human-readable `detail` of an error body.
///
/// A string detail is used as-is; any other non-empty value (FastAPI validation errors are arrays)
/// is reported as compact JSON. Empty, falsy, missing or unparseable bodies fall back to
/// [`UNKNOWN_ERROR`].
pub(crate) fn error_detail(body: &[u8]) -> String {
    let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
        return UNKNOWN_ERROR.to_string();
    };
    match map.get("detail") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | Some(Value::Bool(false)) | Some(Value::String(_)) | None => {
            UNKNOWN_ERROR.to_string()
        }
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => UNKNOWN_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}
