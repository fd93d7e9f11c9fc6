use crate::models::enums::ConditionSeverity;
use crate::models::Condition;

/// Fever threshold in Celsius; readings strictly above it boost febrile conditions.
pub const FEVER_THRESHOLD_C: f64 = 38.5;
pub const FEVER_CONFIDENCE_BOOST: f64 = 0.2;
/// Case-sensitive name fragments that mark a condition as febrile.
pub const FEBRILE_NAME_MARKERS: [&str; 3] = ["Fever", "Dengue", "Typhoid"];
/// Patients older than this get mild conditions escalated.
pub const SENIOR_AGE: i64 = 60;

/// Apply the temperature rule, then the age rule, in place.
pub fn adjust_confidences(conditions: &mut [Condition], temperature_c: Option<f64>, age: i64) {
    apply_temperature_rule(conditions, temperature_c);
    apply_age_rule(conditions, age);
}

pub fn apply_temperature_rule(conditions: &mut [Condition], temperature_c: Option<f64>) {
    let Some(celsius) = temperature_c else {
        return;
    };
    if celsius <= FEVER_THRESHOLD_C {
        return;
    }

    let mut boosted = 0usize;
    for condition in conditions.iter_mut().filter(|c| is_febrile(&c.name)) {
        condition.raise_confidence(FEVER_CONFIDENCE_BOOST);
        boosted += 1;
    }
    tracing::debug!(celsius, boosted, "High temperature boost applied");
}

pub fn apply_age_rule(conditions: &mut [Condition], age: i64) {
    if age <= SENIOR_AGE {
        return;
    }
    for condition in conditions
        .iter_mut()
        .filter(|c| c.severity == ConditionSeverity::Mild)
    {
        condition.severity = ConditionSeverity::Moderate;
    }
}

fn is_febrile(name: &str) -> bool {
    FEBRILE_NAME_MARKERS.iter().any(|marker| name.contains(marker))
}
