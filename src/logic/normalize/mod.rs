//! Normalize Module - Raw Service Reply → Canonical Result
//!
//! - `types` - `PredictionResult`, `ServiceReply`, errors
//! - `normalizer` - tagged decode and alias resolution

pub mod normalizer;
pub mod types;


pub use normalizer::{decode, has_species_indicator, ResponseNormalizer, SPECIES_FIELDS};
pub use types::{
    ConfidenceSource, FeatureImpactEntry, NormalizationError, PredictionResult, ServiceReply,
};
