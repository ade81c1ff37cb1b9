//! Server configuration
//!
//! Every value comes from the environment with a fallback from
//! utils/constants.rs.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_MODEL_FILE, DEFAULT_PORT, DEFAULT_SCALER_FILE, ENV_HOST, ENV_MODEL_PATH,
    ENV_PLATFORM_PORT, ENV_PORT, ENV_SCALER_PATH,
};

/// Runtime configuration for the prediction server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serialized regressor
    pub model_path: PathBuf,
    /// Serialized scaler
    pub scaler_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: cwd.join(DEFAULT_MODEL_FILE),
            scaler_path: cwd.join(DEFAULT_SCALER_FILE),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup(ENV_HOST)
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        // PORT wins over PREDICTOR_PORT when both are set
        let port = lookup(ENV_PLATFORM_PORT)
            .or_else(|| lookup(ENV_PORT))
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let model_path = lookup(ENV_MODEL_PATH)
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);
        let scaler_path = lookup(ENV_SCALER_PATH)
            .map(PathBuf::from)
            .unwrap_or(defaults.scaler_path);

        Self {
            host,
            port,
            model_path,
            scaler_path,
        }
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            AppError::with_source(
                ErrorCode::Unknown,
                format!("invalid listen address {}:{}", self.host, self.port),
                e,
            )
        })
    }
}
