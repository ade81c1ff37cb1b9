//! Input scaler artifact
//!
//! Two scaler families are supported, serialized as tagged JSON:
//!
//! ```json
//! {"kind": "standard", "mean": [..], "scale": [..]}
//! {"kind": "minmax",   "min":  [..], "scale": [..]}
//! ```

use serde::{Deserialize, Serialize};

use crate::models::errors::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    #[serde(rename = "minmax")]
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl Scaler {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Standard { .. } => "standard",
            Self::MinMax { .. } => "minmax",
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            Self::Standard { mean, .. } => mean.len(),
            Self::MinMax { min, .. } => min.len(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let (offset, scale) = match self {
            Self::Standard { mean, scale } => (mean, scale),
            Self::MinMax { min, scale } => (min, scale),
        };

        if offset.is_empty() {
            return Err(AppError::invalid_artifact(format!(
                "{} scaler has no features",
                self.kind()
            )));
        }
        if offset.len() != scale.len() {
            return Err(AppError::invalid_artifact(format!(
                "{} scaler has {} offsets but {} scales",
                self.kind(),
                offset.len(),
                scale.len()
            )));
        }
        if offset.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(AppError::invalid_artifact(format!(
                "{} scaler contains non-finite values",
                self.kind()
            )));
        }
        Ok(())
    }

    /// Scale one row. The row width must match the fitted width.
    pub fn transform(&self, row: &[f64]) -> AppResult<Vec<f64>> {
        if row.len() != self.n_features() {
            return Err(AppError::new(
                ErrorCode::PredictionShapeMismatch,
                format!(
                    "scaler expects {} features, got {}",
                    self.n_features(),
                    row.len()
                ),
            ));
        }

        let scaled = match self {
            Self::Standard { mean, scale } => row
                .iter()
                .zip(mean)
                .zip(scale)
                .map(|((x, m), s)| {
                    // constant columns were fitted with zero variance
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            Self::MinMax { min, scale } => row
                .iter()
                .zip(min)
                .zip(scale)
                .map(|((x, m), s)| x * s + m)
                .collect(),
        };
        Ok(scaled)
    }
}
