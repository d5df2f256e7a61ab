//! Text Report - Presentation of a Submission
//!
//! Consumes `SubmissionReport` only; never inspects raw service replies.

use std::fmt;

use super::commands::SubmissionReport;
use crate::logic::endpoint::{AttemptFailure, FailureCategory, OrchestrationOutcome};
use crate::logic::explain::{ExplanationVerdict, FeatureImpact};
use crate::logic::normalize::PredictionResult;

const GENERIC_FAILURE: &str = "Unable to get prediction. Please try again.";
const NETWORK_FAILURE: &str = "Network error. Please check your connection and try again.";
const EXPLANATION_UNAVAILABLE: &str = "Explainable AI analysis is currently unavailable.";

/// Render a submission as plain text
///
/// `debug` itemizes every failed candidate.
pub fn render(report: &SubmissionReport, debug: bool) -> String {
    TextReport { report, debug }.to_string()
}

/// Plain-text view of a submission
pub struct TextReport<'a> {
    pub report: &'a SubmissionReport,
    pub debug: bool,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.report.outcome {
            OrchestrationOutcome::Success(result) => {
                let verdict = self
                    .report
                    .explanation
                    .as_ref()
                    .unwrap_or(&ExplanationVerdict::Unavailable);
                write_success(f, result, verdict)
            }
            OrchestrationOutcome::Exhausted(failures) => write_failure(f, failures, self.debug),
        }
    }
}

fn write_success(
    f: &mut fmt::Formatter<'_>,
    result: &PredictionResult,
    verdict: &ExplanationVerdict,
) -> fmt::Result {
    writeln!(f, "Predicted Species: {}", result.species)?;

    let confidence = format_percent(result.confidence);
    if result.is_placeholder_confidence() {
        writeln!(f, "Confidence: {} (placeholder, not reported by service)", confidence)?;
    } else {
        writeln!(f, "Confidence: {}", confidence)?;
    }

    writeln!(f)?;
    match verdict {
        ExplanationVerdict::Valid { first, second } => {
            writeln!(f, "Why This Prediction?")?;
            writeln!(
                f,
                "SHAP values explain this {} prediction. Top 2 most influential features:",
                result.species
            )?;
            writeln!(f, "  - {}", format_impact(first))?;
            writeln!(f, "  - {}", format_impact(second))?;
            writeln!(
                f,
                "Positive values increase the likelihood of this species, \
                 negative values decrease it. Final confidence score: {}.",
                confidence
            )
        }
        ExplanationVerdict::Unavailable => {
            writeln!(f, "XAI Analysis Failed: {}", EXPLANATION_UNAVAILABLE)
        }
    }
}

fn write_failure(
    f: &mut fmt::Formatter<'_>,
    failures: &[AttemptFailure],
    debug: bool,
) -> fmt::Result {
    writeln!(f, "Prediction Failed")?;
    writeln!(f, "{}", failure_summary(failures))?;

    // The service's own words are worth showing even outside debug mode
    if let Some(api) = failures
        .iter()
        .rev()
        .find(|a| a.category == FailureCategory::ApiReported)
    {
        writeln!(f, "API Message: {}", api.message)?;
    }

    if debug && !failures.is_empty() {
        writeln!(f, "\nAttempted endpoints:")?;
        for (i, failure) in failures.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} [{}] {}",
                i + 1,
                failure.candidate,
                failure.category,
                failure.message
            )?;
        }
    }

    Ok(())
}

/// Aggregated one-line failure message
pub fn failure_summary(failures: &[AttemptFailure]) -> &'static str {
    let all_transport = !failures.is_empty()
        && failures
            .iter()
            .all(|f| f.category == FailureCategory::Transport);

    if all_transport {
        NETWORK_FAILURE
    } else {
        GENERIC_FAILURE
    }
}

fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn format_impact(feature: &FeatureImpact) -> String {
    // Avoid printing "-0.0000"
    let impact = if feature.impact == 0.0 { 0.0 } else { feature.impact };
    let sign = if impact > 0.0 { "+" } else { "" };
    format!("{}: impact score of {}{:.4}", feature.name, sign, impact)
}
