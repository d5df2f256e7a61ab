//! Endpoint Orchestrator
//!
//! Strict sequential fallback over the configured candidates:
//! - one request in flight at a time
//! - every candidate tried at most once, in list order
//! - the first structurally accepted prediction wins

use serde_json::Value;

use super::transport::{Transport, TransportResponse};
use super::types::{AttemptFailure, EndpointCandidate, FailureCategory, OrchestrationOutcome};
use crate::logic::features::FeatureVector;
use crate::logic::normalize::{
    decode, has_species_indicator, PredictionResult, ResponseNormalizer, ServiceReply,
};

pub struct EndpointOrchestrator<T: Transport> {
    transport: T,
    normalizer: ResponseNormalizer,
}

impl<T: Transport> EndpointOrchestrator<T> {
    pub fn new(transport: T, normalizer: ResponseNormalizer) -> Self {
        Self {
            transport,
            normalizer,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn normalizer(&self) -> &ResponseNormalizer {
        &self.normalizer
    }

    /// Try each candidate in order until one yields a prediction
    pub async fn classify(
        &self,
        vector: &FeatureVector,
        candidates: &[EndpointCandidate],
    ) -> OrchestrationOutcome {
        let mut failures = Vec::with_capacity(candidates.len());

        for (i, candidate) in candidates.iter().enumerate() {
            log::info!("Attempt {}/{}: {}", i + 1, candidates.len(), candidate);

            match self.attempt(candidate, vector).await {
                Ok(result) => {
                    if !failures.is_empty() {
                        log::info!(
                            "Prediction from {} after {} failed attempt(s)",
                            candidate.url,
                            failures.len()
                        );
                    }
                    return OrchestrationOutcome::Success(result);
                }
                Err(failure) => {
                    log::warn!(
                        "{} failed ({}): {}",
                        candidate.url,
                        failure.category,
                        failure.message
                    );
                    failures.push(failure);
                }
            }
        }

        log::error!("All {} endpoint(s) failed", candidates.len());
        OrchestrationOutcome::Exhausted(failures)
    }

    async fn attempt(
        &self,
        candidate: &EndpointCandidate,
        vector: &FeatureVector,
    ) -> Result<PredictionResult, AttemptFailure> {
        let response = self
            .transport
            .send(candidate, vector)
            .await
            .map_err(|e| {
                AttemptFailure::new(candidate, FailureCategory::Transport, e.to_string())
            })?;

        self.interpret(candidate, &response)
    }

    /// Classify a resolved response. Runs synchronously to completion.
    pub fn interpret(
        &self,
        candidate: &EndpointCandidate,
        response: &TransportResponse,
    ) -> Result<PredictionResult, AttemptFailure> {
        let fail = |category: FailureCategory, message: String| {
            AttemptFailure::new(candidate, category, message)
        };

        if !response.is_success() {
            return Err(fail(
                FailureCategory::Protocol,
                format!("HTTP error! Status: {}", response.status),
            ));
        }

        let raw: Value = serde_json::from_str(&response.body)
            .map_err(|e| fail(FailureCategory::Payload, format!("invalid JSON body: {}", e)))?;
        log::debug!("Response data: {}", raw);

        match decode(&raw) {
            Err(e) => return Err(fail(FailureCategory::Payload, e.to_string())),
            Ok(ServiceReply::Failure { message }) => {
                return Err(fail(FailureCategory::ApiReported, message));
            }
            Ok(ServiceReply::Prediction(_)) => {}
        }

        if !has_species_indicator(&raw) {
            return Err(fail(
                FailureCategory::Payload,
                "response carries no species field".to_string(),
            ));
        }

        self.normalizer
            .normalize(&raw)
            .map_err(|e| fail(FailureCategory::Payload, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::endpoint::transport::TransportError;
    use crate::logic::features::encode;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Answers from a fixed script and records every call
    #[derive(Default)]
    struct ScriptedTransport {
        script: HashMap<String, Result<TransportResponse, TransportError>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn reply(mut self, url: &str, status: u16, body: &str) -> Self {
            self.script
                .insert(url.to_string(), Ok(TransportResponse::new(status, body)));
            self
        }

        fn fail(mut self, url: &str, error: TransportError) -> Self {
            self.script.insert(url.to_string(), Err(error));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(
            &self,
            candidate: &EndpointCandidate,
            _vector: &FeatureVector,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.lock().push(candidate.url.clone());
            self.script
                .get(&candidate.url)
                .cloned()
                .unwrap_or_else(|| Err(TransportError::Connect("unscripted".into())))
        }
    }

    fn candidates(urls: &[&str]) -> Vec<EndpointCandidate> {
        urls.iter().map(|u| EndpointCandidate::post(*u)).collect()
    }

    fn vector() -> FeatureVector {
        encode(["38.8", "18.3", "190", "3701"]).unwrap()
    }

    const GENTOO: &str = r#"{
        "prediction": "Gentoo",
        "confidence": 0.87,
        "top_features": [
            { "name": "flipper_length", "impact": 0.21 },
            { "name": "body_mass", "impact": -0.05 }
        ]
    }"#;

    #[tokio::test]
    async fn test_first_success_stops() {
        let transport = ScriptedTransport::default()
            .reply("http://a", 200, GENTOO)
            .reply("http://b", 200, GENTOO);
        let orchestrator = EndpointOrchestrator::new(transport, ResponseNormalizer::default());

        let outcome = orchestrator
            .classify(&vector(), &candidates(&["http://a", "http://b"]))
            .await;

        assert!(outcome.is_success());
        assert_eq!(orchestrator.transport().calls(), ["http://a"]);
    }

    #[tokio::test]
    async fn test_mixed_failures_then_success() {
        let transport = ScriptedTransport::default()
            .fail("http://a", TransportError::Timeout("30s".into()))
            .reply("http://b", 404, "Not Found")
            .reply("http://c", 200, "<html>oops</html>")
            .reply("http://d", 200, GENTOO)
            .reply("http://e", 200, GENTOO);
        let orchestrator = EndpointOrchestrator::new(transport, ResponseNormalizer::default());

        let list = candidates(&["http://a", "http://b", "http://c", "http://d", "http://e"]);
        let outcome = orchestrator.classify(&vector(), &list).await;

        assert_eq!(outcome.result().map(|r| r.species.as_str()), Some("Gentoo"));
        assert_eq!(
            orchestrator.transport().calls(),
            ["http://a", "http://b", "http://c", "http://d"]
        );
    }

    #[tokio::test]
    async fn test_all_fail_in_order() {
        let transport = ScriptedTransport::default()
            .reply("http://a", 500, "")
            .reply("http://b", 200, r#"{"error":"Model not found"}"#)
            .reply("http://c", 200, "[]")
            .fail("http://d", TransportError::Connect("refused".into()));
        let orchestrator = EndpointOrchestrator::new(transport, ResponseNormalizer::default());

        let list = candidates(&["http://a", "http://b", "http://c", "http://d"]);
        let outcome = orchestrator.classify(&vector(), &list).await;

        let failures = outcome.failures();
        assert!(!outcome.is_success());
        assert_eq!(failures.len(), 4);
        assert_eq!(orchestrator.transport().calls().len(), 4);

        let categories: Vec<_> = failures.iter().map(|f| f.category).collect();
        assert_eq!(
            categories,
            [
                FailureCategory::Protocol,
                FailureCategory::ApiReported,
                FailureCategory::Payload,
                FailureCategory::Transport,
            ]
        );
        let urls: Vec<_> = failures.iter().map(|f| f.candidate.url.as_str()).collect();
        assert_eq!(urls, ["http://a", "http://b", "http://c", "http://d"]);
        assert_eq!(failures[1].message, "Model not found");
    }

    #[tokio::test]
    async fn test_empty_candidate_list() {
        let orchestrator =
            EndpointOrchestrator::new(ScriptedTransport::default(), ResponseNormalizer::default());

        let outcome = orchestrator.classify(&vector(), &[]).await;

        assert_eq!(outcome, OrchestrationOutcome::Exhausted(vec![]));
        assert!(orchestrator.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_urls_are_each_tried_once() {
        let transport = ScriptedTransport::default().reply("http://a", 502, "");
        let orchestrator = EndpointOrchestrator::new(transport, ResponseNormalizer::default());

        let outcome = orchestrator
            .classify(&vector(), &candidates(&["http://a", "http://a"]))
            .await;

        assert_eq!(outcome.failures().len(), 2);
        assert_eq!(orchestrator.transport().calls(), ["http://a", "http://a"]);
    }

    #[tokio::test]
    async fn test_timeout_advances_to_next_candidate() {
        use crate::logic::endpoint::transport::tests::silent_server;
        use crate::logic::endpoint::HttpTransport;
        use std::time::Duration;

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/ClassifyPenguinSimple")
            .with_status(200)
            .with_body(GENTOO)
            .create_async()
            .await;

        let list = vec![
            EndpointCandidate::post(format!("{}/api/ClassifyPenguin", silent_server().await)),
            EndpointCandidate::post(format!("{}/api/ClassifyPenguinSimple", server.url())),
        ];
        let transport = HttpTransport::new(Duration::from_millis(300)).unwrap();
        let orchestrator = EndpointOrchestrator::new(transport, ResponseNormalizer::default());

        let outcome = orchestrator.classify(&vector(), &list).await;

        assert_eq!(outcome.result().map(|r| r.species.as_str()), Some("Gentoo"));
    }

    #[tokio::test]
    async fn test_all_timeouts_exhaust_as_transport() {
        use crate::logic::endpoint::transport::tests::silent_server;
        use crate::logic::endpoint::HttpTransport;
        use std::time::Duration;

        let list = vec![EndpointCandidate::post(format!("{}/predict", silent_server().await))];
        let transport = HttpTransport::new(Duration::from_millis(300)).unwrap();
        let orchestrator = EndpointOrchestrator::new(transport, ResponseNormalizer::default());

        let outcome = orchestrator.classify(&vector(), &list).await;

        let categories: Vec<_> = outcome.failures().iter().map(|f| f.category).collect();
        assert_eq!(categories, [FailureCategory::Transport]);
    }

    #[test]
    fn test_object_without_species_is_payload_failure() {
        let orchestrator =
            EndpointOrchestrator::new(ScriptedTransport::default(), ResponseNormalizer::default());
        let candidate = EndpointCandidate::post("http://a");

        let err = orchestrator
            .interpret(&candidate, &TransportResponse::new(200, r#"{"status":"ok"}"#))
            .unwrap_err();
        assert_eq!(err.category, FailureCategory::Payload);
    }

    #[test]
    fn test_success_false_is_api_reported() {
        let orchestrator =
            EndpointOrchestrator::new(ScriptedTransport::default(), ResponseNormalizer::default());
        let candidate = EndpointCandidate::post("http://a");

        let err = orchestrator
            .interpret(
                &candidate,
                &TransportResponse::new(200, r#"{"success":false,"class":"Adelie"}"#),
            )
            .unwrap_err();
        assert_eq!(err.category, FailureCategory::ApiReported);
        assert_eq!(err.message, "Unknown error");
    }

    #[test]
    fn test_any_2xx_is_accepted() {
        let orchestrator =
            EndpointOrchestrator::new(ScriptedTransport::default(), ResponseNormalizer::default());
        let candidate = EndpointCandidate::post("http://a");

        let result = orchestrator
            .interpret(&candidate, &TransportResponse::new(201, r#"{"class":"Adelie"}"#))
            .unwrap();
        assert_eq!(result.species, "Adelie");
        assert!(result.is_placeholder_confidence());
    }
}
