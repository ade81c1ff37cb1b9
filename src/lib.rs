//! Trip Predictor Library
//!
//! Serves a pre-trained trip regression model over HTTP:
//! - `core`: request feature mapping, scaler and regressor artifacts
//! - `api`: axum router, handlers and middleware
//! - `models`: configuration, error codes, feature encodings
//! - `utils`: shared constants

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::{extract_features, parse_payload, Predictor, PredictorInfo, Regressor, Scaler};
pub use api::{create_router, AppState};
pub use models::{AppError, AppResult, ErrorCode, FeatureVector, RiskLevel, ServerConfig};
