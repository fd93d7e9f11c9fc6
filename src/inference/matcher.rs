use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::enums::ConditionSeverity;
use crate::models::{Condition, Medicine};

use super::reference::SymptomConditionTable;

pub const DEFAULT_CONDITION_NAME: &str = "General Health Concern";

/// Look up every symptom, union the templates, keep the first occurrence of
/// each condition name, and order by descending confidence.
///
/// Unknown symptoms are skipped. The sort is stable, so equal confidences
/// keep their symptom order.
pub fn match_conditions(symptoms: &[String], table: &SymptomConditionTable) -> Vec<Condition> {
    let mut seen = HashSet::new();
    let mut matched: Vec<Condition> = symptoms
        .iter()
        .filter_map(|symptom| table.lookup(symptom))
        .flatten()
        .filter(|template| seen.insert(template.name.clone()))
        .cloned()
        .collect();

    matched.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    matched
}

/// Medicines of every matched template, in symptom order, before name
/// deduplication. Capped at `limit`.
pub fn pool_medicines(
    symptoms: &[String],
    table: &SymptomConditionTable,
    limit: usize,
) -> Vec<Medicine> {
    symptoms
        .iter()
        .filter_map(|symptom| table.lookup(symptom))
        .flatten()
        .flat_map(|template| template.medicines.iter())
        .take(limit)
        .cloned()
        .collect()
}

/// Stand-in primary condition when nothing matched.
pub fn default_condition() -> Condition {
    Condition {
        name: DEFAULT_CONDITION_NAME.to_string(),
        confidence: 0.5,
        description: "Based on your symptoms, this appears to be a general health concern that may require medical attention.".to_string(),
        severity: ConditionSeverity::Moderate,
        contagious: false,
        image_url: String::new(),
        medicines: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, confidence: f64, medicine: &str) -> Condition {
        Condition {
            name: name.into(),
            confidence,
            description: String::new(),
            severity: ConditionSeverity::Mild,
            contagious: false,
            image_url: String::new(),
            medicines: vec![Medicine {
                name: medicine.into(),
                image_url: String::new(),
                dosage: "1 tablet".into(),
                notes: String::new(),
                price_npr: String::new(),
            }],
        }
    }

    fn fixture() -> SymptomConditionTable {
        SymptomConditionTable::from_entries(vec![
            (
                "rash".to_string(),
                vec![template("Measles", 0.4, "Calamine"), template("Allergy", 0.6, "Cetirizine")],
            ),
            (
                "itching".to_string(),
                vec![template("Allergy", 0.3, "Loratadine"), template("Scabies", 0.6, "Permethrin")],
            ),
        ])
        .unwrap()
    }

    fn symptoms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_are_sorted_by_confidence() {
        let table = SymptomConditionTable::bundled().unwrap();
        let matched = match_conditions(&symptoms(&["fever"]), &table);
        let names: Vec<&str> = matched.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Dengue Fever", "Typhoid Fever", "Common Cold"]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let table = fixture();
        let matched = match_conditions(&symptoms(&["itching", "rash"]), &table);
        let allergy = matched.iter().find(|c| c.name == "Allergy").unwrap();
        // "itching" came first, so its 0.3 template wins.
        assert_eq!(allergy.confidence, 0.3);
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn stable_order_for_equal_confidence() {
        let table = fixture();
        let matched = match_conditions(&symptoms(&["rash", "itching"]), &table);
        let names: Vec<&str> = matched.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Allergy", "Scabies", "Measles"]);
    }

    #[test]
    fn unknown_and_empty_symptoms_match_nothing() {
        let table = SymptomConditionTable::bundled().unwrap();
        assert!(match_conditions(&symptoms(&["xyzsymptomnotindatabase"]), &table).is_empty());
        assert!(match_conditions(&[], &table).is_empty());
    }

    #[test]
    fn matched_conditions_are_copies() {
        let table = SymptomConditionTable::bundled().unwrap();
        let mut matched = match_conditions(&symptoms(&["fever"]), &table);
        matched[0].confidence = 1.0;
        assert_eq!(table.lookup("fever").unwrap()[0].confidence, 0.7);
    }

    #[test]
    fn medicines_pool_across_all_matches_before_dedup() {
        let table = fixture();
        let pooled = pool_medicines(&symptoms(&["rash", "itching"]), &table, 3);
        let names: Vec<&str> = pooled.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Calamine", "Cetirizine", "Loratadine"]);
    }

    #[test]
    fn default_condition_shape() {
        let c = default_condition();
        assert_eq!(c.name, DEFAULT_CONDITION_NAME);
        assert_eq!(c.confidence, 0.5);
        assert_eq!(c.severity, ConditionSeverity::Moderate);
        assert!(c.medicines.is_empty());
    }
}
