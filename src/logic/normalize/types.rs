//! Normalization Types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ============================================================================
// CANONICAL RESULT
// ============================================================================

/// Where the confidence value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceSource {
    /// Numeric value returned by the service
    Reported,
    /// Configured stand-in; not a measurement
    Placeholder,
}

/// One explanation entry, carried as received
///
/// `name` is kept only when it was a string and `impact` only when it was a
/// number, so malformed entries survive until validation rejects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpactEntry {
    pub name: Option<String>,
    pub impact: Option<f64>,
}

impl FeatureImpactEntry {
    pub fn new(name: impl Into<String>, impact: f64) -> Self {
        Self {
            name: Some(name.into()),
            impact: Some(impact),
        }
    }

    pub(crate) fn from_value(value: &Value) -> Self {
        Self {
            name: value.get("name").and_then(Value::as_str).map(str::to_string),
            impact: value.get("impact").and_then(Value::as_f64),
        }
    }
}

/// Canonical prediction consumed by validation and presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Always populated; `"Unknown"` when no alias carried a value
    pub species: String,
    pub confidence: f64,
    pub confidence_source: ConfidenceSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_features: Option<Vec<FeatureImpactEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionResult {
    /// True when the service explicitly reported a failure
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// True when `confidence` is the configured stand-in
    pub fn is_placeholder_confidence(&self) -> bool {
        self.confidence_source == ConfidenceSource::Placeholder
    }
}

// ============================================================================
// TAGGED DECODE
// ============================================================================

/// Raw reply classified before any field extraction
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply<'a> {
    /// Object without a failure signal
    Prediction(&'a Map<String, Value>),
    /// Object carrying `error` or `success: false`
    Failure { message: String },
}

/// Structurally unusable reply body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("response is not a JSON object (got {0})")]
    NotAnObject(&'static str),
}

/// JSON type name for diagnostics
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
