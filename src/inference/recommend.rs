//! Care recommendations assembled around the matched conditions.
//!
//! Diet, remedies, exercise and warning blocks are generic; they do not vary
//! with which conditions matched. Medicines are pooled across every match,
//! not filtered to the primary condition.

use crate::models::enums::{FoodTiming, OverallSeverity};
use crate::models::{AlternativeDisease, Condition, Medicine, MedicineScheduleEntry};

use super::matcher::default_condition;

pub const MAX_ALTERNATIVES: usize = 3;
pub const MAX_MEDICINES: usize = 3;
pub const SCHEDULE_TIMES: [&str; 3] = ["08:00", "14:00", "20:00"];
pub const DEFAULT_COURSE_DAYS: i64 = 3;

pub const DISCLAIMER: &str =
    "This is not a medical diagnosis. Please consult a doctor for proper evaluation and treatment.";
pub const STOP_MEDICINE_WHEN: &str =
    "When symptoms improve significantly or as directed by healthcare provider";
pub const SEE_DOCTOR_IF: &str =
    "Symptoms worsen, persist beyond 5-7 days, or if you develop severe symptoms";

const FOOD_RECOMMENDATION: &str = "Take with a light snack to avoid stomach upset";

pub const FOOD_TO_EAT: &[&str] = &[
    "Plenty of fluids (water, herbal teas, clear broths)",
    "Fresh fruits rich in vitamin C (oranges, kiwi, guava)",
    "Light, easily digestible foods (rice, toast, bananas)",
    "Warm soups and broths",
    "Honey and ginger tea for throat relief",
];

pub const FOOD_TO_AVOID: &[&str] = &[
    "Dairy products (may increase mucus production)",
    "Spicy and fried foods",
    "Caffeinated beverages",
    "Alcohol and smoking",
    "Processed and sugary foods",
];

pub const NATURAL_REMEDIES: &[&str] = &[
    "Get adequate rest (7-9 hours of sleep)",
    "Stay hydrated with warm fluids",
    "Use a humidifier or steam inhalation",
    "Gargle with warm salt water for sore throat",
    "Apply warm compress for body aches",
];

pub const EXERCISE_TIPS: &[&str] = &[
    "Avoid strenuous exercise during illness",
    "Light stretching or gentle yoga when feeling better",
    "Short walks in fresh air if no fever",
    "Deep breathing exercises",
    "Gradual return to normal activity as symptoms improve",
];

pub const SIDE_EFFECTS: &[&str] = &[
    "Drowsiness from medications",
    "Stomach upset if taken on empty stomach",
    "Allergic reactions (rare but possible)",
];

pub const ALLERGY_WARNINGS: &[&str] = &[
    "Check medicine ingredients against known allergies",
    "Consult doctor if you have drug allergies",
    "Stop medication if unusual reactions occur",
];

pub const PREVENTION_TIPS: &[&str] = &[
    "Wash hands frequently with soap",
    "Avoid close contact with sick individuals",
    "Cover mouth and nose when coughing/sneezing",
    "Maintain good hygiene",
    "Boost immunity with healthy diet and exercise",
];

pub const EMERGENCY_SYMPTOMS: &[&str] = &[
    "High fever above 39°C (102.2°F)",
    "Difficulty breathing or chest pain",
    "Severe dehydration",
    "Persistent vomiting",
    "Signs of severe infection",
];

const BASE_HEALTH_TIPS: &[&str] = &[
    "Get 7-9 hours of quality sleep each night",
    "Stay hydrated by drinking at least 8 glasses of water daily",
    "Practice stress-reduction techniques like meditation or deep breathing",
    "Maintain good hygiene to prevent infections",
    "Exercise regularly as per your fitness level",
];

pub fn to_strings(block: &[&str]) -> Vec<String> {
    block.iter().map(|s| s.to_string()).collect()
}

/// Highest-confidence condition, or the generic default when nothing matched.
pub fn select_primary(conditions: &[Condition]) -> Condition {
    conditions.first().cloned().unwrap_or_else(default_condition)
}

/// Runners-up (ranks 2 through 4), fewer when the list is short.
pub fn select_alternatives(conditions: &[Condition]) -> Vec<AlternativeDisease> {
    conditions
        .iter()
        .skip(1)
        .take(MAX_ALTERNATIVES)
        .map(AlternativeDisease::from)
        .collect()
}

/// Three fixed daily slots per medicine. After food only when the notes say "with food".
pub fn build_schedule(medicines: &[Medicine]) -> Vec<MedicineScheduleEntry> {
    medicines
        .iter()
        .map(|medicine| MedicineScheduleEntry {
            medicine_name: medicine.name.clone(),
            dose: medicine
                .dosage
                .split_whitespace()
                .next()
                .unwrap_or("1 tablet")
                .to_string(),
            times: to_strings(&SCHEDULE_TIMES),
            before_or_after_food: food_timing(&medicine.notes),
            food_recommendation: FOOD_RECOMMENDATION.to_string(),
            notes: medicine.notes.clone(),
        })
        .collect()
}

pub fn food_timing(notes: &str) -> FoodTiming {
    if notes.to_lowercase().contains("with food") {
        FoodTiming::After
    } else {
        FoodTiming::Before
    }
}

pub fn medicine_timeline(duration_days: i64) -> String {
    let days = if duration_days == 0 {
        DEFAULT_COURSE_DAYS
    } else {
        duration_days
    };
    format!("Take prescribed medications for {days}-5 days or as directed by doctor")
}

pub fn fitness_advice(bmi: f64) -> String {
    let advice = if bmi == 0.0 {
        "Unable to calculate BMI. Maintain regular physical activity for good health."
    } else if bmi < 18.5 {
        "Your BMI suggests you are underweight. Focus on strength training and balanced nutrition to build healthy weight."
    } else if bmi < 25.0 {
        "Your BMI is in the healthy range. Maintain your weight with regular exercise and balanced diet."
    } else if bmi < 30.0 {
        "Your BMI suggests you are overweight. Consider increasing physical activity and reducing calorie intake."
    } else {
        "Your BMI suggests obesity. Consult a healthcare provider for a personalized weight management plan."
    };
    advice.to_string()
}

pub fn nutrition_advice(severity: OverallSeverity) -> String {
    let tail = match severity {
        OverallSeverity::Severe => {
            "Focus on easily digestible foods and stay well hydrated during recovery."
        }
        _ => "Maintain regular meal times and avoid processed foods.",
    };
    format!("Eat a balanced diet with plenty of fruits, vegetables, and whole grains. {tail}")
}

pub fn health_tips(age: i64, bmi: f64) -> Vec<String> {
    let mut tips = to_strings(BASE_HEALTH_TIPS);
    if age > 50 {
        tips.push("Regular health check-ups are important at your age".to_string());
    }
    if bmi > 25.0 {
        tips.push("Focus on maintaining a healthy weight through diet and exercise".to_string());
    }
    tips
}
