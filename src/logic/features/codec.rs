//! Feature Codec - Raw Input → Request Vector
//!
//! Parses the four user-entered measurements and applies the fixed
//! unit-normalization from `layout.rs`. Pure transformation, no I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layout::{FEATURE_COUNT, FEATURE_DIVISORS, FEATURE_LAYOUT};

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Normalized feature vector sent to the classification service
///
/// Order: `[culmen_length, culmen_depth, flipper_length/10, body_mass/100]`.
/// All values are finite; only `encode` constructs it from user input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Get values as array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Comma-joined form used as the `features` query parameter
    pub fn to_query_value(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

// ============================================================================
// ENCODING
// ============================================================================

/// Rejected user input. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} is not a number: {input:?}")]
    NotANumber { field: &'static str, input: String },

    #[error("{field} must be a finite number, got {input:?}")]
    NonFinite { field: &'static str, input: String },
}

impl EncodingError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::NotANumber { field, .. }
            | Self::NonFinite { field, .. } => field,
        }
    }
}

/// Encode four raw measurements into the request vector
///
/// Input order is `[culmen_length, culmen_depth, flipper_length, body_mass]`
/// in millimetres and grams.
pub fn encode(raw: [&str; FEATURE_COUNT]) -> Result<FeatureVector, EncodingError> {
    let mut values = [0.0f64; FEATURE_COUNT];

    for (i, input) in raw.iter().enumerate() {
        let field = FEATURE_LAYOUT[i];
        let parsed = parse_measurement(field, input)?;
        values[i] = parsed / FEATURE_DIVISORS[i];
    }

    Ok(FeatureVector { values })
}

fn parse_measurement(field: &'static str, input: &str) -> Result<f64, EncodingError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EncodingError::Empty { field });
    }

    let value: f64 = trimmed.parse().map_err(|_| EncodingError::NotANumber {
        field,
        input: input.to_string(),
    })?;

    // "inf" and "NaN" parse successfully
    if !value.is_finite() {
        return Err(EncodingError::NonFinite {
            field,
            input: input.to_string(),
        });
    }

    Ok(value)
}
