//! API Request Handlers

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use super::types::*;
use crate::core::features::{ensure_json_content_type, parse_payload};
use crate::core::predictor::Predictor;
use crate::models::errors::AppResult;

/// Shared application state
pub struct AppState {
    pub predictor: Predictor,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        model: state.predictor.describe(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

// ============================================
// Prediction
// ============================================

/// `POST /predict`
///
/// Headers and body are checked here rather than by the `Json` extractor so
/// that a wrong content type, malformed JSON and bad fields all land in the
/// same 500 response.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    match run_prediction(&state.predictor, &headers, &body) {
        Ok(prediction) => {
            debug!(prediction, "Prediction served");
            Ok(Json(PredictionResponse { prediction }))
        }
        Err(e) => {
            warn!(code = e.code_str(), "Prediction failed: {}", e.client_message());
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.client_message())),
            ))
        }
    }
}

fn run_prediction(predictor: &Predictor, headers: &HeaderMap, body: &[u8]) -> AppResult<f64> {
    ensure_json_content_type(headers)?;
    let features = parse_payload(body)?;
    debug!(
        risk = features.risk(),
        airport = features.airport(),
        "Scoring request"
    );
    predictor.predict(&features)
}
