use serde::{Deserialize, Serialize};

/// A validated explanation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub name: String,
    pub impact: f64, // positive favours the predicted species
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExplanationVerdict {
    /// The two most influential features, in service order
    Valid {
        first: FeatureImpact,
        second: FeatureImpact,
    },
    Unavailable,
}

impl ExplanationVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}
