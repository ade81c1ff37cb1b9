//! API Request/Response Types
//!
//! The prediction contract is deliberately flat: `{"prediction": n}` on
//! success and `{"error": "..."}` on any failure.

use serde::Serialize;

use crate::core::predictor::PredictorInfo;

// ============================================
// Prediction
// ============================================

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: f64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    #[serde(flatten)]
    pub model: PredictorInfo,
    pub timestamp: i64,
}
