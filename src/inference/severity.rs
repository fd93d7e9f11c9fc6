use crate::models::enums::{ConditionSeverity, OverallSeverity, UrgencyStatus};
use crate::models::Condition;

/// Overall triage for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityAssessment {
    pub severity: OverallSeverity,
    pub urgency: UrgencyStatus,
    pub contagious: bool,
}

/// Priority cascade: any high → severe, else any moderate → moderate, else mild.
/// Contagious if any condition is. Order of `conditions` does not matter.
pub fn derive_severity(conditions: &[Condition]) -> SeverityAssessment {
    let any = |level: ConditionSeverity| conditions.iter().any(|c| c.severity == level);

    let severity = if any(ConditionSeverity::High) {
        OverallSeverity::Severe
    } else if any(ConditionSeverity::Moderate) {
        OverallSeverity::Moderate
    } else {
        OverallSeverity::Mild
    };

    SeverityAssessment {
        severity,
        urgency: UrgencyStatus::from(severity),
        contagious: conditions.iter().any(|c| c.contagious),
    }
}
