use serde::{Deserialize, Serialize};

use super::enums::ConditionSeverity;

/// Over-the-counter medicine suggestion attached to a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub dosage: String,
    #[serde(default)]
    pub notes: String,
    /// Price band in Nepali rupees, e.g. "50-100".
    #[serde(default)]
    pub price_npr: String,
}

/// Candidate diagnosis produced by the matcher.
///
/// Table entries act as templates: every analysis works on its own clone,
/// so adjustments never leak back into the shared table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    pub confidence: f64,
    pub description: String,
    pub severity: ConditionSeverity,
    pub contagious: bool,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
}

impl Condition {
    /// Raise confidence by `delta`, keeping it inside [0, 1].
    pub fn raise_confidence(&mut self, delta: f64) {
        self.confidence = clamp_confidence(self.confidence + delta);
    }

    /// Whole-number percentage label, e.g. "90%".
    pub fn confidence_percent(&self) -> String {
        format!("{}%", (self.confidence * 100.0).round() as i64)
    }
}

pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
