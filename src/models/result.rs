use serde::{Deserialize, Serialize};

use super::condition::{Condition, Medicine};
use super::enums::{FoodTiming, OverallSeverity, UrgencyStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryDisease {
    pub name: String,
    pub image_url: String,
    pub confidence_percent: String,
    pub description: String,
}

impl From<&Condition> for PrimaryDisease {
    fn from(condition: &Condition) -> Self {
        Self {
            name: condition.name.clone(),
            image_url: condition.image_url.clone(),
            confidence_percent: condition.confidence_percent(),
            description: condition.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeDisease {
    pub name: String,
    pub confidence_percent: String,
}

impl From<&Condition> for AlternativeDisease {
    fn from(condition: &Condition) -> Self {
        Self {
            name: condition.name.clone(),
            confidence_percent: condition.confidence_percent(),
        }
    }
}

/// One row of the personalized medicine schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineScheduleEntry {
    pub medicine_name: String,
    pub dose: String,
    pub times: Vec<String>,
    pub before_or_after_food: FoodTiming,
    pub food_recommendation: String,
    pub notes: String,
}

/// Complete analysis returned to the caller.
///
/// Field names and shapes are the public JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub primary_disease: PrimaryDisease,
    pub alternative_diseases: Vec<AlternativeDisease>,
    pub medicines: Vec<Medicine>,
    pub alternative_medicines: Vec<Medicine>,
    pub food_to_eat: Vec<String>,
    pub food_to_avoid: Vec<String>,
    pub natural_remedies: Vec<String>,
    pub exercise_tips: Vec<String>,
    pub side_effects: Vec<String>,
    pub allergy_warnings: Vec<String>,
    pub severity: OverallSeverity,
    #[serde(with = "yes_no")]
    pub contagious: bool,
    pub prevention_tips: Vec<String>,
    pub medicine_usage_timeline: String,
    pub stop_medicine_when: String,
    pub see_doctor_if: String,
    pub emergency_symptoms: Vec<String>,
    pub urgency_status: UrgencyStatus,
    pub bmi: f64,
    pub fitness_advice: String,
    pub nutrition_advice: String,
    pub personalized_medicine_schedule: Vec<MedicineScheduleEntry>,
    pub ai_health_fitness_tips: Vec<String>,
    pub language: String,
    pub disclaimer: String,
    /// Adjusted, deduplicated, confidence-ordered matches. Not part of the wire shape.
    #[serde(skip)]
    pub matched_conditions: Vec<Condition>,
}

mod yes_no {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match String::deserialize(deserializer)?.as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"\"yes\" or \"no\"",
            )),
        }
    }
}
