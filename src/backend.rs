//! Client for the external analysis service.
//!
//! One request at a time, no retries. With no configured timeout a stalled service
//! leaves the call pending until the transport itself gives up.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{ConsiaError, Result};
use crate::result::FAILED_RECOMMENDATION;
use crate::strategy::ExtractionPayload;

/// Service health as reported by `GET /health`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// One row of a batch analysis
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BatchEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub true_rating: f64,
    #[serde(default)]
    pub value_score: f64,
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Vec<BatchEntry>,
}

pub struct AnalysisClient {
    base_url: String,
    agent: ureq::Agent,
}

impl AnalysisClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.backend_url,
            config.backend_timeout_secs.map(Duration::from_secs),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST the payload to `/analyze` and return the raw response body.
    ///
    /// The body's shape is not checked here; that is the result normalizer's job.
    pub fn analyze(&self, payload: &ExtractionPayload) -> Result<Value> {
        tracing::info!(
            title = %payload.title,
            price = payload.price,
            reviews = payload.reviews.len(),
            "sending payload to analysis service"
        );
        self.post_json("/analyze", payload)
    }

    /// POST several payloads to `/batch-analyze`
    pub fn analyze_batch(&self, payloads: &[ExtractionPayload]) -> Result<Vec<BatchEntry>> {
        let body = self.post_json("/batch-analyze", &payloads)?;
        let response: BatchResponse = serde_json::from_value(body)
            .map_err(|e| ConsiaError::InvalidResponse(e.to_string()))?;

        if response.success == Some(false) {
            return Err(ConsiaError::AnalysisFailed(
                response
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| FAILED_RECOMMENDATION.to_string()),
            ));
        }
        Ok(response.results)
    }

    /// GET `/health`
    pub fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint("/health");
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| unreachable(&url, e))?;
        let body = read_body(&url, response)?;
        serde_json::from_value(body).map_err(|e| ConsiaError::InvalidResponse(e.to_string()))
    }

    fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value> {
        let url = self.endpoint(path);
        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| unreachable(&url, e))?;
        read_body(&url, response)
    }
}

fn unreachable(url: &str, error: ureq::Error) -> ConsiaError {
    tracing::warn!(url, error = %error, "analysis service unreachable");
    ConsiaError::BackendUnreachable {
        url: url.to_string(),
        reason: error.to_string(),
    }
}

/// Read a response body as JSON; non-2xx statuses become `BackendStatus`
fn read_body(url: &str, mut response: ureq::http::Response<ureq::Body>) -> Result<Value> {
    let status = response.status();
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ConsiaError::InvalidResponse(e.to_string()))?;
    let parsed = serde_json::from_str::<Value>(&text);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|body| error_message(&body))
            .or_else(|| status.canonical_reason().map(String::from))
            .unwrap_or_else(|| "unknown error".to_string());
        tracing::warn!(url, status = status.as_u16(), %message, "analysis service returned an error status");
        return Err(ConsiaError::BackendStatus {
            status: status.as_u16(),
            message,
        });
    }

    parsed.map_err(|e| ConsiaError::InvalidResponse(e.to_string()))
}

fn error_message(body: &Value) -> Option<String> {
    crate::result::failure_message(body)
}
