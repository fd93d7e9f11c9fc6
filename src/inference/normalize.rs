use crate::models::enums::Language;
use crate::models::{AnalysisRequest, NumericInput};

use super::types::{AnalysisError, AnalysisStage, NormalizedInput};

/// Coerce a raw request into canonical form.
///
/// Best effort: age and duration fall back to 0, out-of-range values pass
/// through untouched. Fails only when a body measurement is present but is
/// not a number, or yields a non-finite BMI.
pub fn normalize(request: &AnalysisRequest) -> Result<NormalizedInput, AnalysisError> {
    let height_cm = measurement("height_cm", request.height_cm.as_ref())?;
    let weight_kg = measurement("weight_kg", request.weight_kg.as_ref())?;

    let bmi = match (height_cm, weight_kg) {
        (Some(h), Some(w)) => {
            let bmi = calculate_bmi(h, w);
            if !bmi.is_finite() {
                return Err(AnalysisError::failed(
                    AnalysisStage::Normalize,
                    format!("BMI is not finite for height_cm={h}, weight_kg={w}"),
                ));
            }
            bmi
        }
        _ => 0.0,
    };

    Ok(NormalizedInput {
        symptoms: request.symptoms.normalized(),
        feelings: request.other_feelings.normalized(),
        allergies: request.allergies.normalized(),
        medical_history: request.medical_history.normalized(),
        selected_medicines: request.selected_medicines.normalized(),
        age: int_or_zero(request.age.as_ref()),
        gender: request.gender.clone(),
        temperature_c: request.temperature.as_ref().and_then(|t| t.celsius()),
        duration_days: int_or_zero(request.duration_days.as_ref()),
        bmi,
        pregnancy_status: request.pregnancy_status.clone(),
        location: request.location.clone(),
        language: request
            .language
            .clone()
            .unwrap_or_else(|| Language::default().as_str().to_string()),
    })
}

/// Body mass index from centimetres and kilograms.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

fn int_or_zero(value: Option<&NumericInput>) -> i64 {
    value.and_then(NumericInput::to_int).unwrap_or(0)
}

/// Absent, blank or zero readings count as "not provided".
fn measurement(field: &str, value: Option<&NumericInput>) -> Result<Option<f64>, AnalysisError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if let NumericInput::Text(s) = value {
        if s.trim().is_empty() {
            return Ok(None);
        }
    }
    match value.to_float() {
        Some(v) if v == 0.0 => Ok(None),
        Some(v) => Ok(Some(v)),
        None => Err(AnalysisError::failed(
            AnalysisStage::Normalize,
            format!("{field} is not a number"),
        )),
    }
}
