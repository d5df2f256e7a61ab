//! Response Normalizer
//!
//! Input: any JSON value returned by a candidate endpoint.
//! Output: `PredictionResult`
//!
//! Field aliases accumulated over several backend deployments:
//! - species: `species_name` > `prediction` > `class`
//! - explanation: `top_features` list, or the XAI `feature_importance` map
//! - failure: `error` / `message`, or `success: false`

use serde_json::{Map, Value};

use super::types::{
    json_kind, ConfidenceSource, FeatureImpactEntry, NormalizationError, PredictionResult,
    ServiceReply,
};
use crate::constants::{DEFAULT_CONFIDENCE, SPECIES_LABELS, UNKNOWN_SPECIES};

/// Species alias fields in precedence order
pub const SPECIES_FIELDS: [&str; 3] = ["species_name", "prediction", "class"];

const FALLBACK_ERROR_MESSAGE: &str = "Unknown error";

// ============================================================================
// DECODE
// ============================================================================

/// Classify a raw reply as prediction or explicit failure
pub fn decode(raw: &Value) -> Result<ServiceReply<'_>, NormalizationError> {
    let object = raw
        .as_object()
        .ok_or_else(|| NormalizationError::NotAnObject(json_kind(raw)))?;

    let error_signalled = object.get("error").is_some_and(is_truthy);
    let success_false = object.get("success").and_then(Value::as_bool) == Some(false);

    if error_signalled || success_false {
        return Ok(ServiceReply::Failure {
            message: failure_message(object),
        });
    }

    Ok(ServiceReply::Prediction(object))
}

/// True if any species alias key is present, whatever its value
pub fn has_species_indicator(raw: &Value) -> bool {
    raw.as_object()
        .is_some_and(|o| SPECIES_FIELDS.iter().any(|f| o.contains_key(*f)))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn failure_message(object: &Map<String, Value>) -> String {
    let non_empty_str = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    };

    non_empty_str("error")
        .or_else(|| non_empty_str("message"))
        .or_else(|| {
            object
                .get("error")
                .filter(|v| matches!(v, Value::Object(_) | Value::Array(_)))
                .map(Value::to_string)
        })
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// Maps raw replies into `PredictionResult`
///
/// Stateless apart from the configured confidence placeholder; the same input
/// always yields the same output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseNormalizer {
    default_confidence: f64,
}

impl ResponseNormalizer {
    pub fn new(default_confidence: f64) -> Self {
        Self { default_confidence }
    }

    pub fn default_confidence(&self) -> f64 {
        self.default_confidence
    }

    /// Normalize a raw reply
    pub fn normalize(&self, raw: &Value) -> Result<PredictionResult, NormalizationError> {
        match decode(raw)? {
            ServiceReply::Failure { message } => Ok(PredictionResult {
                species: UNKNOWN_SPECIES.to_string(),
                confidence: self.default_confidence,
                confidence_source: ConfidenceSource::Placeholder,
                top_features: None,
                error: Some(message),
            }),
            ServiceReply::Prediction(object) => {
                let (confidence, confidence_source) =
                    match object.get("confidence").and_then(Value::as_f64) {
                        Some(c) => (c, ConfidenceSource::Reported),
                        None => (self.default_confidence, ConfidenceSource::Placeholder),
                    };

                Ok(PredictionResult {
                    species: extract_species(object),
                    confidence,
                    confidence_source,
                    top_features: extract_top_features(object),
                    error: None,
                })
            }
        }
    }
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE)
    }
}

// ============================================================================
// FIELD EXTRACTION
// ============================================================================

fn extract_species(object: &Map<String, Value>) -> String {
    SPECIES_FIELDS
        .iter()
        .filter_map(|field| object.get(*field))
        .find_map(species_from_value)
        .unwrap_or_else(|| UNKNOWN_SPECIES.to_string())
}

fn species_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        // Older services answered with the raw class index
        Value::Number(n) => n
            .as_u64()
            .and_then(|i| SPECIES_LABELS.get(i as usize))
            .map(|label| label.to_string()),
        _ => None,
    }
}

fn extract_top_features(object: &Map<String, Value>) -> Option<Vec<FeatureImpactEntry>> {
    if let Some(value) = object.get("top_features").filter(|v| !v.is_null()) {
        // Non-array payloads are kept as an empty list so validation rejects them
        let entries: Vec<FeatureImpactEntry> = value
            .as_array()
            .map(|items| items.iter().map(FeatureImpactEntry::from_value).collect())
            .unwrap_or_default();
        return Some(entries);
    }

    let importance = object.get("feature_importance")?.as_object()?;
    let mut entries: Vec<FeatureImpactEntry> = importance
        .iter()
        .map(|(name, impact)| FeatureImpactEntry {
            name: Some(name.clone()),
            impact: impact.as_f64(),
        })
        .collect();

    // Largest absolute impact first; entries without a numeric impact last
    entries.sort_by(|a, b| {
        let a_abs = a.impact.map(f64::abs).unwrap_or(f64::NEG_INFINITY);
        let b_abs = b.impact.map(f64::abs).unwrap_or(f64::NEG_INFINITY);
        b_abs
            .partial_cmp(&a_abs)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    Some(entries)
}
