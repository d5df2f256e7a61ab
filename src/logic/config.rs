//! Client Configuration
//!
//! Layering, lowest to highest precedence:
//! 1. Defaults from `constants.rs`
//! 2. JSON config file (explicit path, `PENGUIN_CLIENT_CONFIG`, or the user
//!    config directory)
//! 3. `PENGUIN_*` environment variables
//! 4. Command-line flags (`FlagOverrides`)
//!
//! `validate` runs once, after the last layer.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    self, DEFAULT_CONFIDENCE, DEFAULT_ENDPOINTS, DEFAULT_TIMEOUT_SECS, ENV_DEBUG,
    ENV_DEFAULT_CONFIDENCE, ENV_ENDPOINTS, ENV_TIMEOUT_SECS,
};
use crate::logic::endpoint::{EndpointCandidate, EndpointParseError, HttpMethod};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] EndpointParseError),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("no classification endpoints configured")]
    NoEndpoints,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("default confidence must be within 0..=1, got {0}")]
    ConfidenceOutOfRange(f64),
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Candidates in try order
    pub endpoints: Vec<EndpointCandidate>,
    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
    /// Stand-in confidence when the service omits one
    pub default_confidence: f64,
    /// Itemize per-endpoint failures in reports
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS
                .iter()
                .map(|(method, url)| {
                    let method = if method.eq_ignore_ascii_case("GET") {
                        HttpMethod::Get
                    } else {
                        HttpMethod::Post
                    };
                    EndpointCandidate::new(method, *url)
                })
                .collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_confidence: DEFAULT_CONFIDENCE,
            debug: false,
        }
    }
}

/// Command-line layer; set fields mask the matching environment variable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagOverrides {
    /// `[METHOD ]URL` entries in try order
    pub endpoints: Vec<String>,
    pub timeout_secs: Option<u64>,
    pub debug: bool,
}

impl FlagOverrides {
    fn masks(&self, key: &str) -> bool {
        match key {
            ENV_ENDPOINTS => !self.endpoints.is_empty(),
            ENV_TIMEOUT_SECS => self.timeout_secs.is_some(),
            ENV_DEBUG => self.debug,
            _ => false,
        }
    }
}

impl ClientConfig {
    /// Resolve every layer from the process environment, then validate
    pub fn load(explicit_path: Option<&Path>, flags: &FlagOverrides) -> Result<Self, ConfigError> {
        Self::load_with(explicit_path, |key| std::env::var(key).ok(), flags)
    }

    /// `load` with an explicit environment lookup
    ///
    /// Validation runs once, after the flags.
    pub fn load_with<F>(
        explicit_path: Option<&Path>,
        lookup: F,
        flags: &FlagOverrides,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match resolve_config_path(explicit_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| if flags.masks(key) { None } else { lookup(key) })?;
        config.apply_flags(flags)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded client config from {}", path.display());
        Ok(config)
    }

    /// Apply `PENGUIN_*` overrides from a key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ENDPOINTS).filter(|s| !s.trim().is_empty()) {
            self.endpoints = parse_endpoint_list(&raw)?;
            log::debug!("Endpoints overridden from {}", ENV_ENDPOINTS);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(ENV_DEFAULT_CONFIDENCE) {
            self.default_confidence =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_DEFAULT_CONFIDENCE,
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = lookup(ENV_DEBUG) {
            self.debug = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_DEBUG,
                value: raw.clone(),
            })?;
        }

        Ok(())
    }

    /// Apply command-line flags, the highest-precedence layer
    pub fn apply_flags(&mut self, flags: &FlagOverrides) -> Result<(), ConfigError> {
        if !flags.endpoints.is_empty() {
            self.endpoints = flags
                .endpoints
                .iter()
                .map(|e| e.parse::<EndpointCandidate>())
                .collect::<Result<_, _>>()?;
        }
        if let Some(timeout_secs) = flags.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if flags.debug {
            self.debug = true;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }
        for endpoint in &self.endpoints {
            endpoint.check_url()?;
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !(0.0..=1.0).contains(&self.default_confidence) {
            return Err(ConfigError::ConfidenceOutOfRange(self.default_confidence));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parse a comma-separated list of `[METHOD ]URL` entries
pub fn parse_endpoint_list(raw: &str) -> Result<Vec<EndpointCandidate>, EndpointParseError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Default config file location in the user config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(constants::APP_NAME).join("config.json"))
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    if let Some(path) = constants::env_config_path() {
        return Some(path);
    }
    default_config_path().filter(|p| p.exists())
}
