use serde::{Deserialize, Serialize};

use super::enums::TemperatureUnit;

/// List-shaped field that clients send either as a JSON array or as a
/// single comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    List(Vec<String>),
    Text(String),
}

impl Default for StringOrList {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl StringOrList {
    /// Canonical form: trimmed, lowercased, empty fragments dropped, order kept.
    pub fn normalized(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.iter().filter_map(|s| clean(s)).collect(),
            Self::Text(text) => text.split(',').filter_map(clean).collect(),
        }
    }
}

fn clean(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

impl From<Vec<&str>> for StringOrList {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(String::from).collect())
    }
}

impl From<&str> for StringOrList {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Numeric field that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Integer reading with leading-prefix semantics: "42 years" → 42, 65.9 → 65.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            Self::Number(_) => None,
            Self::Text(s) => parse_int_prefix(s),
        }
    }

    /// Exact integer reading: a whole JSON number or an all-digit string
    /// (optional sign). "42 years", 65.9 and " 30" are rejected.
    pub fn to_exact_int(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            Self::Number(_) => None,
            Self::Text(s) => s.parse::<i64>().ok(),
        }
    }

    /// Float reading with leading-prefix semantics: "70.5kg" → 70.5.
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => parse_float_prefix(s),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for NumericInput {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(s.len());
    // Longest parseable prefix wins ("1.5e" → 1.5).
    (1..=end)
        .rev()
        .find_map(|i| s[..i].parse::<f64>().ok())
}

/// Body temperature reading as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(default)]
    pub value: Option<NumericInput>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Temperature {
    pub fn unit(&self) -> TemperatureUnit {
        match self.unit.as_deref() {
            Some("F") => TemperatureUnit::Fahrenheit,
            _ => TemperatureUnit::Celsius,
        }
    }

    /// Reading in Celsius. `None` when no usable value was given
    /// (missing, zero, or not a number).
    pub fn celsius(&self) -> Option<f64> {
        let value = self.value.as_ref()?.to_float()?;
        if value == 0.0 || !value.is_finite() {
            return None;
        }
        Some(match self.unit() {
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Celsius => value,
        })
    }
}

/// Symptom analysis payload as submitted by clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub symptoms: StringOrList,
    #[serde(default, alias = "feelings")]
    pub other_feelings: StringOrList,
    #[serde(default)]
    pub allergies: StringOrList,
    #[serde(default)]
    pub medical_history: StringOrList,
    #[serde(default)]
    pub age: Option<NumericInput>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub temperature: Option<Temperature>,
    #[serde(default)]
    pub duration_days: Option<NumericInput>,
    #[serde(default)]
    pub height_cm: Option<NumericInput>,
    #[serde(default)]
    pub weight_kg: Option<NumericInput>,
    #[serde(default)]
    pub pregnancy_status: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub selected_medicines: StringOrList,
}

impl AnalysisRequest {
    pub fn with_symptoms(symptoms: &[&str]) -> Self {
        Self {
            symptoms: StringOrList::from(symptoms.to_vec()),
            ..Self::default()
        }
    }
}
