use std::collections::BTreeMap;
use std::path::Path;

use crate::models::Condition;

use super::types::AnalysisError;

/// File name of the symptom table inside a reference directory.
pub const SYMPTOM_TABLE_FILE: &str = "symptom_conditions.json";

const BUNDLED_TABLE: &str = include_str!("../../resources/symptom_conditions.json");

/// Read-only symptom → condition templates.
///
/// Loaded once at startup and shared behind an `Arc`. Lookups hand out
/// borrowed templates; the matcher clones them before any adjustment.
#[derive(Debug, Clone, Default)]
pub struct SymptomConditionTable {
    entries: BTreeMap<String, Vec<Condition>>,
}

impl SymptomConditionTable {
    /// Table shipped with the binary.
    pub fn bundled() -> Result<Self, AnalysisError> {
        Self::from_json(SYMPTOM_TABLE_FILE, BUNDLED_TABLE)
    }

    /// Load the table from `<resources_dir>/symptom_conditions.json`.
    pub fn load(resources_dir: &Path) -> Result<Self, AnalysisError> {
        let path = resources_dir.join(SYMPTOM_TABLE_FILE);
        let json = std::fs::read_to_string(&path).map_err(|e| {
            AnalysisError::ReferenceDataLoad(path.display().to_string(), e.to_string())
        })?;
        Self::from_json(SYMPTOM_TABLE_FILE, &json)
    }

    /// Use the override in `resources_dir` when present, otherwise the bundled table.
    pub fn load_or_bundled(resources_dir: Option<&Path>) -> Result<Self, AnalysisError> {
        match resources_dir {
            Some(dir) if dir.join(SYMPTOM_TABLE_FILE).is_file() => {
                tracing::info!(dir = %dir.display(), "Loading symptom table override");
                Self::load(dir)
            }
            _ => Self::bundled(),
        }
    }

    pub fn from_json(source: &str, json: &str) -> Result<Self, AnalysisError> {
        let raw: BTreeMap<String, Vec<Condition>> = serde_json::from_str(json)
            .map_err(|e| AnalysisError::ReferenceDataParse(source.into(), e.to_string()))?;
        Self::from_entries(raw)
            .map_err(|reason| AnalysisError::ReferenceDataParse(source.into(), reason))
    }

    /// Build a table from in-memory entries. Keys are lowercased and trimmed;
    /// every template must carry a confidence in [0, 1].
    pub fn from_entries<I>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (String, Vec<Condition>)>,
    {
        let mut table = BTreeMap::new();
        for (symptom, conditions) in entries {
            for c in &conditions {
                if !(0.0..=1.0).contains(&c.confidence) {
                    return Err(format!(
                        "confidence {} for '{}' under '{}' is outside [0, 1]",
                        c.confidence, c.name, symptom
                    ));
                }
            }
            table
                .entry(symptom.trim().to_lowercase())
                .or_insert_with(Vec::new)
                .extend(conditions);
        }
        Ok(Self { entries: table })
    }

    /// Exact lookup on an already-normalized symptom.
    pub fn lookup(&self, symptom: &str) -> Option<&[Condition]> {
        self.entries.get(symptom).map(Vec::as_slice)
    }

    /// Known symptom keys in sorted order.
    pub fn symptoms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::ConditionSeverity;

    #[test]
    fn bundled_table_parses() {
        let table = SymptomConditionTable::bundled().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.symptoms().collect::<Vec<_>>(), vec!["cough", "fever", "headache"]);

        let fever = table.lookup("fever").unwrap();
        let names: Vec<&str> = fever.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Dengue Fever", "Typhoid Fever", "Common Cold"]);
        assert_eq!(fever[0].severity, ConditionSeverity::High);
    }

    #[test]
    fn lookup_is_exact() {
        let table = SymptomConditionTable::bundled().unwrap();
        assert!(table.lookup("Fever").is_none());
        assert!(table.lookup("fevers").is_none());
        assert!(table.lookup("fever").is_some());
    }

    #[test]
    fn keys_are_normalized_on_build() {
        let json = r#"{" Rash ": [{"name":"Measles","confidence":0.5,"description":"","severity":"moderate","contagious":true}]}"#;
        let table = SymptomConditionTable::from_json("inline", json).unwrap();
        assert!(table.lookup("rash").is_some());
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let json = r#"{"rash": [{"name":"Measles","confidence":1.5,"description":"","severity":"moderate","contagious":true}]}"#;
        let err = SymptomConditionTable::from_json("inline", json).unwrap_err();
        assert!(matches!(err, AnalysisError::ReferenceDataParse(..)));
    }

    #[test]
    fn unknown_severity_is_a_parse_error() {
        let json = r#"{"rash": [{"name":"Measles","confidence":0.5,"description":"","severity":"severe","contagious":true}]}"#;
        assert!(SymptomConditionTable::from_json("inline", json).is_err());
    }

    #[test]
    fn load_reads_override_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SYMPTOM_TABLE_FILE),
            r#"{"nausea": [{"name":"Gastritis","confidence":0.55,"description":"","severity":"mild","contagious":false}]}"#,
        )
        .unwrap();

        let table = SymptomConditionTable::load_or_bundled(Some(dir.path())).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.lookup("nausea").is_some());
    }

    #[test]
    fn missing_override_falls_back_to_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let table = SymptomConditionTable::load_or_bundled(Some(dir.path())).unwrap();
        assert!(table.lookup("fever").is_some());
    }

    #[test]
    fn load_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SymptomConditionTable::load(dir.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::ReferenceDataLoad(..)));
    }
}
