//! Feature Layout - Wire Schema of the Request Vector
//!
//! **This file controls the request schema.**
//!
//! The backend model was trained on rescaled flipper length and body mass.
//! Changing an entry here or a divisor below is a breaking change to the wire
//! format and must be coordinated with the deployed model.

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Feature names in the exact order they appear in the vector
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    "culmen_length",  // 0: beak length, mm
    "culmen_depth",   // 1: beak depth, mm
    "flipper_length", // 2: flipper length, mm / 10
    "body_mass",      // 3: body mass, g / 100
];

/// Total number of features
pub const FEATURE_COUNT: usize = 4;

// ============================================================================
// UNIT NORMALIZATION
// ============================================================================

/// Divisor applied to flipper length before submission
pub const FLIPPER_LENGTH_DIVISOR: f64 = 10.0;

/// Divisor applied to body mass before submission
pub const BODY_MASS_DIVISOR: f64 = 100.0;

/// Per-index divisor (1.0 = pass-through)
pub const FEATURE_DIVISORS: [f64; FEATURE_COUNT] =
    [1.0, 1.0, FLIPPER_LENGTH_DIVISOR, BODY_MASS_DIVISOR];

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}
