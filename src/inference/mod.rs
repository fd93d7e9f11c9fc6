//! Symptom inference engine.
//!
//! Single-pass pipeline per request:
//! normalize → match → adjust → derive severity → aggregate recommendations.
//! The only shared state is the read-only symptom table.

pub mod adjust;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod recommend;
pub mod reference;
pub mod severity;
pub mod types;

pub use engine::DefaultSymptomAnalyzer;
pub use reference::SymptomConditionTable;
pub use types::{AnalysisError, AnalysisStage, NormalizedInput, SymptomAnalyzer};
