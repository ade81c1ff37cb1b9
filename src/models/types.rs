//! Feature encodings shared by the request parser and the model.

use serde_json::Value;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{AIRPORT_YES, FEATURE_COUNT, FIELD_RISK};

/// Categorical risk label of a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl RiskLevel {
    /// Exact, case-sensitive label match
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }

    pub fn code(&self) -> f64 {
        *self as u8 as f64
    }
}

/// Numeric code for a raw `risk` value. Unrecognised scalars encode as 0;
/// arrays and objects cannot be looked up and fail.
pub fn risk_code(value: &Value) -> AppResult<f64> {
    match value {
        Value::Array(_) => Err(AppError::unhashable_field(FIELD_RISK, "an array")),
        Value::Object(_) => Err(AppError::unhashable_field(FIELD_RISK, "an object")),
        _ => Ok(value
            .as_str()
            .and_then(RiskLevel::from_label)
            .map(|level| level.code())
            .unwrap_or(0.0)),
    }
}

/// 1 only for the exact string "Yes", 0 otherwise.
pub fn airport_code(value: &Value) -> f64 {
    match value.as_str() {
        Some(AIRPORT_YES) => 1.0,
        _ => 0.0,
    }
}

/// One model input row: risk, population, commute, airport, trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(risk: f64, population: f64, commute: f64, airport: f64, trip: f64) -> Self {
        Self([risk, population, commute, airport, trip])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn risk(&self) -> f64 {
        self.0[0]
    }

    pub fn airport(&self) -> f64 {
        self.0[3]
    }
}
