//! Symptom endpoints.
//!
//! - `POST /api/symptoms/analyze`: run the inference engine
//! - `GET /api/symptoms/catalog`: symptoms the engine recognizes

use std::str::FromStr;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::enums::{Gender, Language};
use crate::models::{AnalysisRequest, AnalysisResult, StringOrList};

const MIN_AGE: i64 = 1;
const MAX_AGE: i64 = 120;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub message: &'static str,
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub data: AnalysisResult,
    pub processing_time_ms: u64,
}

/// `POST /api/symptoms/analyze`: validate and analyze a symptom report.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let start = Instant::now();
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    validate(&request)?;

    let analysis_id = Uuid::new_v4();
    tracing::info!(analysis_id = %analysis_id, "Symptom analysis requested");

    let data = ctx.analyzer.clone().analyze_async(request).await?;
    let processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        analysis_id = %analysis_id,
        processing_ms = processing_time_ms,
        "Symptom analysis served"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        message: "Symptom analysis completed successfully",
        analysis_id,
        analyzed_at: Utc::now(),
        data,
        processing_time_ms,
    }))
}

/// Request checks performed before the engine runs.
pub fn validate(request: &AnalysisRequest) -> Result<(), ApiError> {
    match &request.symptoms {
        StringOrList::List(items) => {
            if items.is_empty() {
                return Err(ApiError::BadRequest("At least one symptom is required".into()));
            }
            if items.iter().any(|s| s.trim().is_empty()) {
                return Err(ApiError::BadRequest(
                    "All symptoms must be non-empty strings".into(),
                ));
            }
        }
        StringOrList::Text(_) => {
            if request.symptoms.normalized().is_empty() {
                return Err(ApiError::BadRequest("At least one symptom is required".into()));
            }
        }
    }

    // Strict here; the engine's own reading is lenient.
    if let Some(age) = &request.age {
        match age.to_exact_int() {
            Some(a) if (MIN_AGE..=MAX_AGE).contains(&a) => {}
            _ => {
                return Err(ApiError::BadRequest(format!(
                    "Age must be between {MIN_AGE} and {MAX_AGE}"
                )))
            }
        }
    }

    if let Some(gender) = &request.gender {
        Gender::from_str(gender).map_err(|_| ApiError::BadRequest("Invalid gender".into()))?;
    }

    if let Some(language) = &request.language {
        Language::from_str(language)
            .map_err(|_| ApiError::BadRequest("Invalid language".into()))?;
    }

    Ok(())
}

#[derive(Serialize)]
pub struct CatalogEntry {
    pub symptom: String,
    pub conditions: Vec<String>,
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub symptoms: Vec<CatalogEntry>,
}

/// `GET /api/symptoms/catalog`: known symptom keys and the conditions they map to.
pub async fn catalog(State(ctx): State<ApiContext>) -> Json<CatalogResponse> {
    let table = ctx.analyzer.table();
    let symptoms = table
        .symptoms()
        .map(|symptom| CatalogEntry {
            symptom: symptom.to_string(),
            conditions: table
                .lookup(symptom)
                .unwrap_or_default()
                .iter()
                .map(|c| c.name.clone())
                .collect(),
        })
        .collect();

    Json(CatalogResponse { symptoms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NumericInput;

    fn err_message(result: Result<(), ApiError>) -> String {
        match result {
            Err(ApiError::BadRequest(msg)) => msg,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn requires_at_least_one_symptom() {
        let req = AnalysisRequest::default();
        assert_eq!(err_message(validate(&req)), "At least one symptom is required");

        let req = AnalysisRequest {
            symptoms: StringOrList::from(" , "),
            ..AnalysisRequest::default()
        };
        assert_eq!(err_message(validate(&req)), "At least one symptom is required");
    }

    #[test]
    fn rejects_blank_symptom_entries() {
        let req = AnalysisRequest::with_symptoms(&["fever", "  "]);
        assert_eq!(err_message(validate(&req)), "All symptoms must be non-empty strings");
    }

    #[test]
    fn age_must_be_in_range() {
        let mut req = AnalysisRequest::with_symptoms(&["fever"]);
        req.age = Some(NumericInput::Number(0.0));
        assert!(validate(&req).is_err());
        req.age = Some(NumericInput::Number(121.0));
        assert!(validate(&req).is_err());
        req.age = Some(NumericInput::Text("65".into()));
        assert!(validate(&req).is_ok());
        req.age = Some(NumericInput::Number(120.0));
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn age_must_be_a_whole_number() {
        let mut req = AnalysisRequest::with_symptoms(&["fever"]);
        for age in [
            NumericInput::Text("42 years".into()),
            NumericInput::Number(65.9),
            NumericInput::Text("30abc".into()),
            NumericInput::Text("".into()),
        ] {
            req.age = Some(age.clone());
            assert_eq!(
                err_message(validate(&req)),
                "Age must be between 1 and 120",
                "accepted {age:?}"
            );
        }
    }

    #[test]
    fn gender_and_language_are_checked() {
        let mut req = AnalysisRequest::with_symptoms(&["fever"]);
        req.gender = Some("female".into());
        req.language = Some("Nepali".into());
        assert!(validate(&req).is_ok());

        req.gender = Some("unknown".into());
        assert_eq!(err_message(validate(&req)), "Invalid gender");

        req.gender = None;
        req.language = Some("French".into());
        assert_eq!(err_message(validate(&req)), "Invalid language");
    }

    #[test]
    fn comma_string_symptoms_are_accepted() {
        let req = AnalysisRequest {
            symptoms: StringOrList::from("fever, cough"),
            ..AnalysisRequest::default()
        };
        assert!(validate(&req).is_ok());
    }
}
