use serde::{Deserialize, Serialize};

/// Per-channel multipliers plus a global contrast multiplier.
///
/// Produced by the recommendation service and trusted as-is: the factors are
/// expected to be positive, but nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationFactors {
    pub red_adjustment: f64,
    pub green_adjustment: f64,
    pub blue_adjustment: f64,
    pub contrast_boost: f64,
    /// Human-readable notes, in the order the service produced them
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AdaptationFactors {
    /// Factors that leave every color unchanged.
    pub fn neutral() -> Self {
        Self {
            red_adjustment: 1.0,
            green_adjustment: 1.0,
            blue_adjustment: 1.0,
            contrast_boost: 1.0,
            recommendations: Vec::new(),
        }
    }
}

impl Default for AdaptationFactors {
    fn default() -> Self {
        Self::neutral()
    }
}
