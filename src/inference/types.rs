use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AnalysisRequest, AnalysisResult};

// ---------------------------------------------------------------------------
// AnalysisStage
// ---------------------------------------------------------------------------

/// Pipeline stage, carried by failures for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Normalize,
    Match,
    Adjust,
    Derive,
    Aggregate,
    /// Handing the work to the blocking pool (async entry point only).
    Dispatch,
}

impl AnalysisStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normalize => "normalize",
            Self::Match => "match",
            Self::Adjust => "adjust",
            Self::Derive => "derive",
            Self::Aggregate => "aggregate",
            Self::Dispatch => "dispatch",
        }
    }
}

impl std::fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NormalizedInput
// ---------------------------------------------------------------------------

/// Request after coercion: canonical lists, integer age/duration, BMI, Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    pub symptoms: Vec<String>,
    pub feelings: Vec<String>,
    pub allergies: Vec<String>,
    pub medical_history: Vec<String>,
    pub selected_medicines: Vec<String>,
    pub age: i64,
    pub gender: Option<String>,
    /// `None` when no usable temperature was reported.
    pub temperature_c: Option<f64>,
    pub duration_days: i64,
    /// 0 means unknown.
    pub bmi: f64,
    pub pregnancy_status: Option<String>,
    pub location: Option<String>,
    pub language: String,
}

// ---------------------------------------------------------------------------
// AnalysisError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The only runtime failure kind. No partial result accompanies it.
    #[error("Failed to analyze symptoms ({stage}): {reason}")]
    Failed {
        stage: AnalysisStage,
        reason: String,
    },

    #[error("Reference data load failed ({0}): {1}")]
    ReferenceDataLoad(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    ReferenceDataParse(String, String),
}

impl AnalysisError {
    pub fn failed(stage: AnalysisStage, reason: impl Into<String>) -> Self {
        Self::Failed {
            stage,
            reason: reason.into(),
        }
    }

    pub fn stage(&self) -> Option<AnalysisStage> {
        match self {
            Self::Failed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SymptomAnalyzer trait
// ---------------------------------------------------------------------------

/// Symptom → guidance inference.
pub trait SymptomAnalyzer {
    /// Run the full pipeline for one request.
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}
