//! Features Module - Request Vector Construction
//!
//! - `layout` - feature order and unit-normalization divisors
//! - `codec` - raw strings → `FeatureVector`
//! - `presets` - species reference measurements

pub mod codec;
pub mod layout;
pub mod presets;

#[cfg(test)]
mod tests;

// Re-export common types
pub use codec::{encode, EncodingError, FeatureVector};
pub use layout::{BODY_MASS_DIVISOR, FEATURE_COUNT, FEATURE_LAYOUT, FLIPPER_LENGTH_DIVISOR};
pub use presets::{find_preset, SpeciesPreset, PRESETS};
