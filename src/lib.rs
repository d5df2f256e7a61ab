//! Penguin Classifier Client
//!
//! Collects four penguin measurements, submits them to a classification
//! service that may live behind one of several historical endpoints, and
//! normalizes whatever comes back into one canonical result.
//!
//! # Architecture
//!
//! ```text
//! raw strings ─▶ features::encode ─▶ EndpointOrchestrator ─▶ explain::validate
//!                                       │  ▲                        │
//!                                       ▼  │                        ▼
//!                                   Transport (reqwest)      SubmissionSession
//!                                       │                           │
//!                                       ▼                           ▼
//!                                ResponseNormalizer          observer / report
//! ```

pub mod api;
pub mod constants;
pub mod logic;

pub use api::{ClassifierContext, SubmissionReport, SubmitError};
pub use logic::config::ClientConfig;
pub use logic::endpoint::{EndpointCandidate, HttpMethod, OrchestrationOutcome};
pub use logic::explain::ExplanationVerdict;
pub use logic::normalize::PredictionResult;
