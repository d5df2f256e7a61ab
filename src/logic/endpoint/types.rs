//! Endpoint Types

use std::fmt;
use std::str::FromStr;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::features::FeatureVector;
use crate::logic::normalize::PredictionResult;

// ============================================================================
// CANDIDATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Post,
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Get => "GET",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One address that might serve the classification request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointCandidate {
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
}

impl EndpointCandidate {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Only absolute http(s) URLs with a host are accepted
    pub fn check_url(&self) -> Result<(), EndpointParseError> {
        let parsed =
            Url::parse(&self.url).map_err(|_| EndpointParseError::InvalidUrl(self.url.clone()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EndpointParseError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(EndpointParseError::InvalidUrl(self.url.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for EndpointCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointParseError {
    #[error("empty endpoint entry")]
    Empty,

    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("endpoint URL scheme must be http or https, got {0}")]
    UnsupportedScheme(String),
}

/// Parses `"[METHOD ]URL"`; the method defaults to POST
impl FromStr for EndpointCandidate {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let first = parts.next().ok_or(EndpointParseError::Empty)?;

        let candidate = match parts.next() {
            None => EndpointCandidate::post(first),
            Some(url) => {
                if let Some(extra) = parts.next() {
                    return Err(EndpointParseError::InvalidUrl(format!("{} {}", url, extra)));
                }
                let method = match first.to_ascii_uppercase().as_str() {
                    "POST" => HttpMethod::Post,
                    "GET" => HttpMethod::Get,
                    _ => return Err(EndpointParseError::UnsupportedMethod(first.to_string())),
                };
                EndpointCandidate::new(method, url)
            }
        };

        candidate.check_url()?;
        Ok(candidate)
    }
}

// ============================================================================
// REQUEST
// ============================================================================

/// JSON body sent to POST candidates
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassifyRequest {
    pub features: FeatureVector,
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// Why a single attempt did not produce a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Connection, DNS, or timeout
    Transport,
    /// Non-2xx status
    Protocol,
    /// Body is not a usable JSON object
    Payload,
    /// Well-formed object that reports failure
    ApiReported,
}

impl FailureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::Transport => "transport",
            FailureCategory::Protocol => "protocol",
            FailureCategory::Payload => "payload",
            FailureCategory::ApiReported => "api_reported",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure record for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptFailure {
    pub candidate: EndpointCandidate,
    pub category: FailureCategory,
    pub message: String,
}

impl AttemptFailure {
    pub fn new(
        candidate: &EndpointCandidate,
        category: FailureCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            candidate: candidate.clone(),
            category,
            message: message.into(),
        }
    }
}

/// Terminal result of one `classify` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum OrchestrationOutcome {
    Success(PredictionResult),
    /// Every candidate failed; records are in candidate order
    Exhausted(Vec<AttemptFailure>),
}

impl OrchestrationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Success(result) => Some(result),
            Self::Exhausted(_) => None,
        }
    }

    pub fn failures(&self) -> &[AttemptFailure] {
        match self {
            Self::Success(_) => &[],
            Self::Exhausted(failures) => failures,
        }
    }
}
