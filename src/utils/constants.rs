//! Constants Module
//!
//! Feature layout, env var names and server defaults live here so that
//! nothing else hardcodes them.

// ============================================
// FEATURE LAYOUT
// ============================================

/// Number of model inputs per request
pub const FEATURE_COUNT: usize = 5;

/// Request field names, in model column order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["risk", "population", "commute", "airport", "trip"];

pub const FIELD_RISK: &str = "risk";
pub const FIELD_POPULATION: &str = "population";
pub const FIELD_COMMUTE: &str = "commute";
pub const FIELD_AIRPORT: &str = "airport";
pub const FIELD_TRIP: &str = "trip";

/// The only airport value that encodes as 1
pub const AIRPORT_YES: &str = "Yes";

// ============================================
// ARTIFACTS
// ============================================

pub const DEFAULT_MODEL_FILE: &str = "predictor.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

// ============================================
// ENVIRONMENT
// ============================================

pub const ENV_HOST: &str = "PREDICTOR_HOST";
/// Platform-provided port (Railway, Koyeb, Heroku); takes precedence
pub const ENV_PLATFORM_PORT: &str = "PORT";
pub const ENV_PORT: &str = "PREDICTOR_PORT";
pub const ENV_MODEL_PATH: &str = "PREDICTOR_MODEL_PATH";
pub const ENV_SCALER_PATH: &str = "PREDICTOR_SCALER_PATH";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
