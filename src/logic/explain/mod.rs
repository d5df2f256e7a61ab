//! Explain Module - Explanation Payload Validation
//!
//! Strict shape check over `PredictionResult::top_features`.

pub mod types;
pub mod validator;

pub use types::{ExplanationVerdict, FeatureImpact};
pub use validator::{validate, MIN_EXPLANATION_ENTRIES};
