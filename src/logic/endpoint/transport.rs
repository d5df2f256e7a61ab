//! Transport - HTTP boundary of the orchestrator
//!
//! The orchestrator only sees `(status, body)` pairs or a `TransportError`;
//! everything protocol-specific lives behind the `Transport` trait.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::types::{ClassifyRequest, EndpointCandidate, HttpMethod};
use crate::constants::{APP_NAME, APP_VERSION};
use crate::logic::features::FeatureVector;

/// Raw HTTP answer, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to create HTTP client: {0}")]
    Setup(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Sends one classification request to one candidate.
///
/// Implementations must resolve every call exactly once; the orchestrator
/// awaits each call before issuing the next.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        candidate: &EndpointCandidate,
        vector: &FeatureVector,
    ) -> Result<TransportResponse, TransportError>;
}

// ============================================================================
// REQWEST TRANSPORT
// ============================================================================

/// Production transport over `reqwest`
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with an explicit per-attempt timeout
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", APP_NAME, APP_VERSION))
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        candidate: &EndpointCandidate,
        vector: &FeatureVector,
    ) -> Result<TransportResponse, TransportError> {
        let request = match candidate.method {
            HttpMethod::Post => self
                .http_client
                .post(&candidate.url)
                .json(&ClassifyRequest { features: *vector }),
            HttpMethod::Get => self
                .http_client
                .get(&candidate.url)
                .query(&[("features", vector.to_query_value())]),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        log::debug!("{} response status: {}", candidate.url, status);

        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
