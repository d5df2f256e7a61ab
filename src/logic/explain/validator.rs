use super::types::{ExplanationVerdict, FeatureImpact};
use crate::logic::normalize::{FeatureImpactEntry, PredictionResult};

/// Minimum number of entries for an explanation to be shown
pub const MIN_EXPLANATION_ENTRIES: usize = 2;

/// Decide whether a result carries a usable explanation.
///
/// Any malformed entry rejects the whole list; there is no partial rendering.
pub fn validate(result: &PredictionResult) -> ExplanationVerdict {
    let Some(entries) = result.top_features.as_deref() else {
        return ExplanationVerdict::Unavailable;
    };

    if entries.len() < MIN_EXPLANATION_ENTRIES {
        return ExplanationVerdict::Unavailable;
    }

    let validated: Option<Vec<FeatureImpact>> = entries.iter().map(validate_entry).collect();

    match validated.as_deref() {
        Some([first, second, ..]) => ExplanationVerdict::Valid {
            first: first.clone(),
            second: second.clone(),
        },
        _ => ExplanationVerdict::Unavailable,
    }
}

fn validate_entry(entry: &FeatureImpactEntry) -> Option<FeatureImpact> {
    let name = entry.name.as_deref().filter(|n| !n.is_empty())?;
    let impact = entry.impact.filter(|i| i.is_finite())?;

    Some(FeatureImpact {
        name: name.to_string(),
        impact,
    })
}
