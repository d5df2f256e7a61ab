//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default endpoint order, only edit this file.

/// Classification endpoints in canonical try order.
///
/// The backend path moved several times across deployments; the simplified
/// function is the one currently serving, the container-backed function and the
/// local development server are kept as fallbacks.
pub const DEFAULT_ENDPOINTS: &[(&str, &str)] = &[
    (
        "POST",
        "https://penguin-classifier-consumption-dngqgqbga0g2eqgy.northeurope-01.azurewebsites.net/api/ClassifyPenguinSimple",
    ),
    (
        "POST",
        "https://penguin-classifier-consumption-dngqgqbga0g2eqgy.northeurope-01.azurewebsites.net/api/ClassifyPenguin",
    ),
    ("POST", "http://localhost:5000/predict"),
];

/// Per-attempt timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Confidence placeholder used when the service omits a numeric confidence.
///
/// This is NOT a measurement. Results carrying it are tagged
/// `ConfidenceSource::Placeholder`.
pub const DEFAULT_CONFIDENCE: f64 = 0.52;

/// Species sentinel when no alias field carries a usable value
pub const UNKNOWN_SPECIES: &str = "Unknown";

/// Label table for services that answer with a numeric class index
pub const SPECIES_LABELS: [&str; 3] = ["Adelie", "Chinstrap", "Gentoo"];

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "penguin-classify";

// ============================================
// Environment variable names
// ============================================

pub const ENV_CONFIG_PATH: &str = "PENGUIN_CLIENT_CONFIG";
pub const ENV_ENDPOINTS: &str = "PENGUIN_ENDPOINTS";
pub const ENV_TIMEOUT_SECS: &str = "PENGUIN_TIMEOUT_SECS";
pub const ENV_DEFAULT_CONFIDENCE: &str = "PENGUIN_DEFAULT_CONFIDENCE";
pub const ENV_DEBUG: &str = "PENGUIN_DEBUG";

// ============================================
// Helper functions to read from env
// ============================================

/// Config file path from environment
pub fn env_config_path() -> Option<std::path::PathBuf> {
    std::env::var(ENV_CONFIG_PATH).ok().map(std::path::PathBuf::from)
}
