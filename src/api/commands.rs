//! Classifier Commands
//!
//! Entry points used by the command-line surface. Each submission runs
//! codec → orchestrator → validator and reports its terminal outcome to the
//! session exactly once.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::logic::config::ClientConfig;
use crate::logic::endpoint::{
    EndpointCandidate, EndpointOrchestrator, HttpTransport, OrchestrationOutcome, Transport,
    TransportError,
};
use crate::logic::explain::{self, ExplanationVerdict};
use crate::logic::features::{self, EncodingError, SpeciesPreset, PRESETS};
use crate::logic::normalize::ResponseNormalizer;
use crate::logic::session::{SessionError, Settlement, SubmissionSession};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Everything one submission needs to see
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    pub submission_id: Uuid,
    pub settlement: Settlement,
    pub outcome: OrchestrationOutcome,
    /// Present only for successful outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<ExplanationVerdict>,
}

/// Caller-owned context: configuration, orchestrator and session
pub struct ClassifierContext<T: Transport> {
    config: ClientConfig,
    orchestrator: EndpointOrchestrator<T>,
    session: SubmissionSession,
}

impl ClassifierContext<HttpTransport> {
    /// Build a context backed by the reqwest transport
    pub fn from_config(
        config: ClientConfig,
        session: SubmissionSession,
    ) -> Result<Self, SubmitError> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::new(config, transport, session))
    }
}

impl<T: Transport> ClassifierContext<T> {
    pub fn new(config: ClientConfig, transport: T, session: SubmissionSession) -> Self {
        let normalizer = ResponseNormalizer::new(config.default_confidence);
        Self {
            orchestrator: EndpointOrchestrator::new(transport, normalizer),
            config,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SubmissionSession {
        &self.session
    }

    pub fn orchestrator(&self) -> &EndpointOrchestrator<T> {
        &self.orchestrator
    }

    /// Classify four raw measurements
    ///
    /// Encoding errors return before the session leaves its current state and
    /// before any request is made.
    pub async fn submit(&self, raw: [&str; 4]) -> Result<SubmissionReport, SubmitError> {
        let vector = features::encode(raw)?;
        log::info!("Sending request payload: {:?}", vector.as_array());

        let ticket = self.session.begin()?;
        let submission_id = ticket.id();

        let outcome = self
            .orchestrator
            .classify(&vector, &self.config.endpoints)
            .await;

        let settlement = self.session.settle(ticket, &outcome)?;
        let explanation = outcome.result().map(explain::validate);

        Ok(SubmissionReport {
            submission_id,
            settlement,
            outcome,
            explanation,
        })
    }

    /// Classify using a species reference preset
    pub async fn submit_preset(
        &self,
        preset: &SpeciesPreset,
    ) -> Result<SubmissionReport, SubmitError> {
        self.submit(preset.raw_inputs()).await
    }
}

/// Species reference measurements
pub fn list_presets() -> &'static [SpeciesPreset] {
    &PRESETS
}

/// Candidates in the order they will be tried
pub fn list_endpoints(config: &ClientConfig) -> &[EndpointCandidate] {
    &config.endpoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::endpoint::TransportResponse;
    use crate::logic::features::FeatureVector;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Always answers with the same response and counts calls
    struct FixedTransport {
        status: u16,
        body: &'static str,
        calls: Mutex<usize>,
    }

    impl FixedTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(
            &self,
            _candidate: &EndpointCandidate,
            _vector: &FeatureVector,
        ) -> Result<TransportResponse, TransportError> {
            *self.calls.lock() += 1;
            Ok(TransportResponse::new(self.status, self.body))
        }
    }

    fn config(urls: &[&str]) -> ClientConfig {
        ClientConfig {
            endpoints: urls.iter().map(|u| EndpointCandidate::post(*u)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_encoding_error_skips_network_and_session() {
        let context = ClassifierContext::new(
            config(&["http://a.test"]),
            FixedTransport::new(200, r#"{"class":"Adelie"}"#),
            SubmissionSession::new(),
        );

        let err = tokio_test::block_on(context.submit(["38.8", "abc", "190", "3701"])).unwrap_err();

        assert!(matches!(err, SubmitError::Encoding(_)));
        assert_eq!(*context.orchestrator().transport().calls.lock(), 0);
        assert_eq!(context.session().state(), crate::logic::session::SessionState::Idle);
    }

    #[test]
    fn test_success_report_with_unavailable_explanation() {
        let context = ClassifierContext::new(
            config(&["http://a.test"]),
            FixedTransport::new(200, r#"{"class":"Adelie"}"#),
            SubmissionSession::new(),
        );

        let report = tokio_test::block_on(context.submit(["38.8", "18.3", "190", "3701"])).unwrap();

        assert_eq!(report.settlement, Settlement::Success);
        assert_eq!(report.explanation, Some(ExplanationVerdict::Unavailable));
        assert!(!context.session().is_in_flight());
    }

    #[test]
    fn test_exhausted_report_has_no_explanation() {
        let context = ClassifierContext::new(
            config(&["http://a.test", "http://b.test"]),
            FixedTransport::new(500, ""),
            SubmissionSession::new(),
        );

        let report = tokio_test::block_on(context.submit_preset(&PRESETS[2])).unwrap();

        assert_eq!(report.settlement, Settlement::Error);
        assert_eq!(report.outcome.failures().len(), 2);
        assert!(report.explanation.is_none());
        assert_eq!(*context.orchestrator().transport().calls.lock(), 2);
    }

    #[test]
    fn test_submit_rejected_while_in_flight() {
        let session = SubmissionSession::new();
        let context = ClassifierContext::new(
            config(&["http://a.test"]),
            FixedTransport::new(200, r#"{"class":"Adelie"}"#),
            session.clone(),
        );

        let _ticket = session.begin().unwrap();
        let err =
            tokio_test::block_on(context.submit(["38.8", "18.3", "190", "3701"])).unwrap_err();

        assert!(matches!(err, SubmitError::Session(SessionError::AlreadySubmitting(_))));
        assert_eq!(*context.orchestrator().transport().calls.lock(), 0);
    }

    #[test]
    fn test_list_endpoints_keeps_order() {
        let config = config(&["http://a.test", "http://b.test"]);
        let urls: Vec<_> = list_endpoints(&config).iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, ["http://a.test", "http://b.test"]);
        assert_eq!(list_presets().len(), 3);
    }
}
