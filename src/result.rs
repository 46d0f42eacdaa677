//! Result normalizer - one display model for every response shape the analysis
//! service has produced.
//!
//! Two shapes exist. The legacy shape is flat (`sentiment`, `fake_review_percent`,
//! `value_score`, ...). The current shape carries a `success` flag and nests the
//! same data under `product`, `metrics` and `insights`. Every canonical field is
//! resolved through an ordered list of JSON pointers, nested paths first; the first
//! present, non-null value wins and every list ends in a default.

use serde::Serialize;
use serde_json::Value;

/// Alternative locations for each canonical field, highest precedence first
pub mod paths {
    pub const RECOMMENDATION: &[&str] = &["/recommendation"];
    pub const TITLE: &[&str] = &["/product/title", "/title"];
    pub const PRICE: &[&str] = &["/product/price", "/price"];
    pub const POSITIVE: &[&str] = &[
        "/metrics/sentiment/positive_percent",
        "/metrics/sentiment/positive",
        "/sentiment/positive_percent",
        "/sentiment/positive",
    ];
    pub const NEGATIVE: &[&str] = &[
        "/metrics/sentiment/negative_percent",
        "/metrics/sentiment/negative",
        "/sentiment/negative_percent",
        "/sentiment/negative",
    ];
    pub const NEUTRAL: &[&str] = &[
        "/metrics/sentiment/neutral_percent",
        "/metrics/sentiment/neutral",
        "/sentiment/neutral_percent",
        "/sentiment/neutral",
    ];
    pub const FAKE_PERCENT: &[&str] = &[
        "/metrics/fake_reviews_percent",
        "/metrics/fake_review_percent",
        "/fake_reviews_percent",
        "/fake_review_percent",
    ];
    pub const VALUE_SCORE: &[&str] = &["/metrics/value_score", "/value_score"];
    pub const TRUE_RATING: &[&str] = &["/metrics/true_rating", "/true_rating"];
    pub const PROS: &[&str] = &["/insights/pros", "/pros"];
    pub const CONS: &[&str] = &["/insights/cons", "/cons"];
    pub const SUMMARY: &[&str] = &["/summary", "/analysis_summary"];
    pub const CONFIDENCE: &[&str] = &["/confidence"];
    pub const REVIEW_COUNT: &[&str] = &["/product/review_count", "/review_count"];
    /// Human-readable failure text for `success: false` responses
    pub const FAILURE_MESSAGE: &[&str] = &["/error", "/message"];
}

pub const FAILED_RECOMMENDATION: &str = "Analysis Failed";
const UNKNOWN_RECOMMENDATION: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    /// Flat fields, no `success` flag
    Legacy,
    /// `success` flag with nested `product` / `metrics` / `insights`
    Current,
}

/// Sentiment split in percent; usually sums to about 100, not enforced
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Sentiment {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// The only thing presentation ever sees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalResult {
    pub recommendation: String,
    pub title: String,
    pub price: Option<f64>,
    pub sentiment: Sentiment,
    pub fake_percent: f64,
    pub value_score: f64,
    pub true_rating: Option<f64>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub summary: Option<String>,
    pub confidence: Option<String>,
    pub review_count: Option<u64>,
    pub schema: Schema,
    /// Set when the body itself reported failure
    pub failed: bool,
    pub error: Option<String>,
}

/// Detect the response shape by the presence of `success`
pub fn detect_schema(raw: &Value) -> Schema {
    if raw.get("success").is_some() {
        Schema::Current
    } else {
        Schema::Legacy
    }
}

/// Normalize any analysis response into a complete [`CanonicalResult`]. Never fails.
pub fn normalize_result(raw: &Value) -> CanonicalResult {
    let schema = detect_schema(raw);

    if raw.get("success").and_then(Value::as_bool) == Some(false) {
        return degraded(raw, schema);
    }

    CanonicalResult {
        recommendation: text(raw, paths::RECOMMENDATION)
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_RECOMMENDATION.to_string()),
        title: text(raw, paths::TITLE).unwrap_or_default(),
        price: optional_number(raw, paths::PRICE),
        sentiment: Sentiment {
            positive: number(raw, paths::POSITIVE),
            negative: number(raw, paths::NEGATIVE),
            neutral: number(raw, paths::NEUTRAL),
        },
        fake_percent: number(raw, paths::FAKE_PERCENT),
        value_score: number(raw, paths::VALUE_SCORE),
        true_rating: optional_number(raw, paths::TRUE_RATING),
        pros: list(raw, paths::PROS),
        cons: list(raw, paths::CONS),
        summary: text(raw, paths::SUMMARY).filter(|s| !s.is_empty()),
        confidence: text(raw, paths::CONFIDENCE),
        review_count: optional_number(raw, paths::REVIEW_COUNT)
            .filter(|n| *n >= 0.0)
            .map(|n| n as u64),
        schema,
        failed: false,
        error: None,
    }
}

/// `success: false`: keep identity fields, zero every metric
fn degraded(raw: &Value, schema: Schema) -> CanonicalResult {
    let message = failure_message(raw).unwrap_or_else(|| FAILED_RECOMMENDATION.to_string());
    tracing::warn!(%message, "analysis service reported failure");

    CanonicalResult {
        recommendation: message.clone(),
        title: text(raw, paths::TITLE).unwrap_or_default(),
        price: optional_number(raw, paths::PRICE),
        sentiment: Sentiment::default(),
        fake_percent: 0.0,
        value_score: 0.0,
        true_rating: None,
        pros: Vec::new(),
        cons: Vec::new(),
        summary: None,
        confidence: None,
        review_count: None,
        schema,
        failed: true,
        error: Some(message),
    }
}

/// First failure text that is a non-blank string; empty or non-string values are skipped
pub fn failure_message(raw: &Value) -> Option<String> {
    paths::FAILURE_MESSAGE
        .iter()
        .filter_map(|path| raw.pointer(path).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(String::from)
}

/// First alternative that is present and not null
pub fn resolve<'a>(raw: &'a Value, alternatives: &[&str]) -> Option<&'a Value> {
    alternatives
        .iter()
        .filter_map(|path| raw.pointer(path))
        .find(|v| !v.is_null())
}

/// JSON numbers and numeric strings; anything else is not a number
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn number(raw: &Value, alternatives: &[&str]) -> f64 {
    resolve(raw, alternatives).and_then(coerce_number).unwrap_or(0.0)
}

fn optional_number(raw: &Value, alternatives: &[&str]) -> Option<f64> {
    resolve(raw, alternatives).map(|v| coerce_number(v).unwrap_or(0.0))
}

fn text(raw: &Value, alternatives: &[&str]) -> Option<String> {
    match resolve(raw, alternatives)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn list(raw: &Value, alternatives: &[&str]) -> Vec<String> {
    match resolve(raw, alternatives) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
