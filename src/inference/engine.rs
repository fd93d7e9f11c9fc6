use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crate::models::{AnalysisRequest, AnalysisResult, Condition, PrimaryDisease};

use super::adjust::adjust_confidences;
use super::matcher::{match_conditions, pool_medicines};
use super::normalize::normalize;
use super::recommend::{
    build_schedule, fitness_advice, health_tips, medicine_timeline, nutrition_advice,
    select_alternatives, select_primary, to_strings, ALLERGY_WARNINGS, DISCLAIMER,
    EMERGENCY_SYMPTOMS, EXERCISE_TIPS, FOOD_TO_AVOID, FOOD_TO_EAT, MAX_MEDICINES,
    NATURAL_REMEDIES, PREVENTION_TIPS, SEE_DOCTOR_IF, SIDE_EFFECTS, STOP_MEDICINE_WHEN,
};
use super::reference::SymptomConditionTable;
use super::severity::derive_severity;
use super::types::{AnalysisError, AnalysisStage, SymptomAnalyzer};

/// Rule-based analyzer over an injected symptom table.
///
/// Holds no per-request state; one instance serves any number of
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct DefaultSymptomAnalyzer {
    table: Arc<SymptomConditionTable>,
}

impl DefaultSymptomAnalyzer {
    pub fn new(table: Arc<SymptomConditionTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SymptomConditionTable {
        &self.table
    }

    /// Run `analyze` on tokio's blocking pool.
    pub async fn analyze_async(
        self: Arc<Self>,
        request: AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        tokio::task::spawn_blocking(move || self.analyze(&request))
            .await
            .map_err(|e| AnalysisError::failed(AnalysisStage::Dispatch, e.to_string()))?
    }

    fn run_pipeline(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let input = normalize(request)?;

        let mut conditions = match_conditions(&input.symptoms, &self.table);
        tracing::debug!(
            symptoms = input.symptoms.len(),
            matched = conditions.len(),
            "Conditions matched"
        );

        adjust_confidences(&mut conditions, input.temperature_c, input.age);
        // Boosts can overtake an earlier entry; primary must stay the highest.
        conditions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        check_confidences(&conditions)?;

        let assessment = derive_severity(&conditions);

        let primary = select_primary(&conditions);
        let medicines = pool_medicines(&input.symptoms, &self.table, MAX_MEDICINES);
        let schedule = build_schedule(&medicines);

        Ok(AnalysisResult {
            primary_disease: PrimaryDisease::from(&primary),
            alternative_diseases: select_alternatives(&conditions),
            medicines,
            alternative_medicines: Vec::new(),
            food_to_eat: to_strings(FOOD_TO_EAT),
            food_to_avoid: to_strings(FOOD_TO_AVOID),
            natural_remedies: to_strings(NATURAL_REMEDIES),
            exercise_tips: to_strings(EXERCISE_TIPS),
            side_effects: to_strings(SIDE_EFFECTS),
            allergy_warnings: to_strings(ALLERGY_WARNINGS),
            severity: assessment.severity,
            contagious: assessment.contagious,
            prevention_tips: to_strings(PREVENTION_TIPS),
            medicine_usage_timeline: medicine_timeline(input.duration_days),
            stop_medicine_when: STOP_MEDICINE_WHEN.to_string(),
            see_doctor_if: SEE_DOCTOR_IF.to_string(),
            emergency_symptoms: to_strings(EMERGENCY_SYMPTOMS),
            urgency_status: assessment.urgency,
            bmi: input.bmi,
            fitness_advice: fitness_advice(input.bmi),
            nutrition_advice: nutrition_advice(assessment.severity),
            personalized_medicine_schedule: schedule,
            ai_health_fitness_tips: health_tips(input.age, input.bmi),
            language: input.language,
            disclaimer: DISCLAIMER.to_string(),
            matched_conditions: conditions,
        })
    }
}

impl SymptomAnalyzer for DefaultSymptomAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let start = Instant::now();
        tracing::info!("Starting symptom analysis");

        match self.run_pipeline(request) {
            Ok(result) => {
                tracing::info!(
                    primary = %result.primary_disease.name,
                    severity = %result.severity,
                    urgency = result.urgency_status.as_str(),
                    alternatives = result.alternative_diseases.len(),
                    processing_ms = start.elapsed().as_millis() as u64,
                    "Symptom analysis complete"
                );
                Ok(result)
            }
            Err(err) => {
                tracing::error!(
                    stage = ?err.stage(),
                    error = %err,
                    "Symptom analysis error"
                );
                Err(err)
            }
        }
    }
}

fn check_confidences(conditions: &[Condition]) -> Result<(), AnalysisError> {
    match conditions
        .iter()
        .find(|c| !(0.0..=1.0).contains(&c.confidence))
    {
        Some(c) => Err(AnalysisError::failed(
            AnalysisStage::Adjust,
            format!("confidence {} for '{}' left [0, 1]", c.confidence, c.name),
        )),
        None => Ok(()),
    }
}
