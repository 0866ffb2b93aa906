//! Observability configuration parsing from environment variables.
//!
//! This module handles the metrics endpoint switch, the log output format and
//! the rolling log file location.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_LOG_DIR: &str = "logs";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Invalid LOG_FORMAT: {}. Must be 'pretty' or 'json'", s),
        }
    }
}

/// Observability environment configuration
#[derive(Debug, Clone)]
pub struct ObservabilityEnvConfig {
    pub enabled: bool,
    pub log_format: LogFormat,
    /// Directory for rolling log files, `None` for console only
    pub log_dir: Option<PathBuf>,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_format: LogFormat::Pretty,
            log_dir: Some(PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> Result<Self> {
        let enabled = match env::var("OBSERVABILITY_ENABLED") {
            Ok(raw) => raw
                .trim()
                .parse::<bool>()
                .with_context(|| format!("Failed to parse OBSERVABILITY_ENABLED={raw:?}"))?,
            Err(_) => true,
        };
        let log_format = match env::var("LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => LogFormat::Pretty,
        };
        // An empty LOG_DIR turns the file output off
        let log_dir = match env::var("LOG_DIR") {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(PathBuf::from(raw.trim())),
            Err(_) => Some(PathBuf::from(DEFAULT_LOG_DIR)),
        };

        Ok(Self {
            enabled,
            log_format,
            log_dir,
        })
    }
}
