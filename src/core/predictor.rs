//! Scaler + regressor pair loaded once at startup.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::core::regressor::Regressor;
use crate::core::scaler::Scaler;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::FeatureVector;
use crate::utils::constants::{FEATURE_COUNT, FEATURE_NAMES};

/// Read-only inference pipeline: scale one row, then predict.
#[derive(Debug, Clone)]
pub struct Predictor {
    scaler: Scaler,
    regressor: Regressor,
}

/// Summary of the loaded artifacts
#[derive(Debug, Clone, Serialize)]
pub struct PredictorInfo {
    pub model_kind: &'static str,
    pub scaler_kind: &'static str,
    pub feature_count: usize,
    pub feature_names: [&'static str; FEATURE_COUNT],
}

impl Predictor {
    /// Pair a scaler with a regressor. Both must be valid and take exactly
    /// one column per request feature.
    pub fn new(scaler: Scaler, regressor: Regressor) -> AppResult<Self> {
        scaler.validate()?;
        regressor.validate()?;

        if scaler.n_features() != FEATURE_COUNT {
            return Err(AppError::shape_mismatch(format!(
                "scaler was fitted on {} features, expected {}",
                scaler.n_features(),
                FEATURE_COUNT
            )));
        }
        if regressor.n_features() != FEATURE_COUNT {
            return Err(AppError::shape_mismatch(format!(
                "model was fitted on {} features, expected {}",
                regressor.n_features(),
                FEATURE_COUNT
            )));
        }

        Ok(Self { scaler, regressor })
    }

    /// Load both artifacts from JSON files.
    pub fn load(model_path: impl AsRef<Path>, scaler_path: impl AsRef<Path>) -> AppResult<Self> {
        let regressor: Regressor = read_artifact(model_path.as_ref(), "model")?;
        let scaler: Scaler = read_artifact(scaler_path.as_ref(), "scaler")?;
        let predictor = Self::new(scaler, regressor)?;

        let summary = predictor.describe();
        info!(
            "📦 Loaded {} model with {} scaler ({} features)",
            summary.model_kind, summary.scaler_kind, summary.feature_count
        );
        Ok(predictor)
    }

    /// Scale and predict a single row.
    pub fn predict(&self, features: &FeatureVector) -> AppResult<f64> {
        let scaled = self.scaler.transform(features.as_slice())?;
        let prediction = self.regressor.predict(&scaled)?;

        if !prediction.is_finite() {
            return Err(AppError::new(
                ErrorCode::PredictionNonFinite,
                format!("model produced a non-finite prediction ({})", prediction),
            ));
        }
        Ok(prediction)
    }

    pub fn describe(&self) -> PredictorInfo {
        PredictorInfo {
            model_kind: self.regressor.kind(),
            scaler_kind: self.scaler.kind(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_NAMES,
        }
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path, label: &str) -> AppResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::with_source(
            ErrorCode::ArtifactReadFailed,
            format!("failed to read {} artifact at {}", label, path.display()),
            e,
        )
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        AppError::with_source(
            ErrorCode::ArtifactParseFailed,
            format!("failed to parse {} artifact at {}", label, path.display()),
            e,
        )
    })
}
