//! Endpoint Module - Classification Requests with Fallback
//!
//! This module handles:
//! - Candidate endpoint description and parsing
//! - The HTTP transport boundary
//! - Sequential fallback across candidates

pub mod orchestrator;
pub mod transport;
pub mod types;

pub use orchestrator::EndpointOrchestrator;
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
pub use types::{
    AttemptFailure, ClassifyRequest, EndpointCandidate, EndpointParseError, FailureCategory,
    HttpMethod, OrchestrationOutcome,
};
