//! Core Module - Feature Mapping & Inference
//!
//! Payload decoding, scaling and the regression model itself.

pub mod features;
pub mod predictor;
pub mod regressor;
pub mod scaler;

pub use features::*;
pub use predictor::*;
pub use regressor::*;
pub use scaler::*;
