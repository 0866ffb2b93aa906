//! Configuration module for windcast.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Server, Artifacts, and Observability.

mod artifact_config;
mod observability_config;
mod server_config;

pub use artifact_config::{
    ArtifactEnvConfig, DEFAULT_MODEL_PATH, DEFAULT_MODEL_VERSION, DEFAULT_SCALER_PATH,
};
pub use observability_config::{DEFAULT_LOG_DIR, LogFormat, ObservabilityEnvConfig};
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub artifacts: ArtifactEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env().context("Failed to load server config")?;
        let artifacts = ArtifactEnvConfig::from_env();
        let observability =
            ObservabilityEnvConfig::from_env().context("Failed to load observability config")?;

        Ok(Self {
            server,
            artifacts,
            observability,
        })
    }
}
