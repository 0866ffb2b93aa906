//! Scoring artifact locations and the version string reported with each prediction.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "wind_power_model.json";
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";
pub const DEFAULT_MODEL_VERSION: &str = "1.0";

/// Artifact environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactEnvConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub model_version: String,
}

impl Default for ArtifactEnvConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler_path: PathBuf::from(DEFAULT_SCALER_PATH),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
        }
    }
}

impl ArtifactEnvConfig {
    pub fn from_env() -> Self {
        Self {
            model_path: env::var("WINDCAST_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH)),
            scaler_path: env::var("WINDCAST_SCALER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCALER_PATH)),
            model_version: env::var("WINDCAST_MODEL_VERSION")
                .unwrap_or_else(|_| DEFAULT_MODEL_VERSION.to_string()),
        }
    }
}
