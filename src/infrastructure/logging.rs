use crate::config::LogFormat;
use anyhow::Context;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILE_PREFIX: &str = "wind_power_api";
/// Rotated files kept on disk, current one included
pub const MAX_LOG_FILES: usize = 5;

/// Daily-rotated `wind_power_api.<date>.log` files under `dir`.
pub fn file_appender(dir: &Path) -> anyhow::Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
        .with_context(|| format!("Failed to open log directory {:?}", dir))
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
///
/// Console output always goes to stdout. With `log_dir` set, the same events
/// are also written to a rolling file; keep the returned guard alive for the
/// lifetime of the process or buffered lines are lost.
pub fn init(format: LogFormat, log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(dir)?);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).pretty())
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_target(true).json())
            .try_init(),
    }
    .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_appender_writes_under_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        let mut appender = file_appender(&logs).unwrap();
        appender.write_all(b"Model and scaler loaded successfully.\n").unwrap();
        appender.flush().unwrap();

        let files: Vec<String> = std::fs::read_dir(&logs)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with(LOG_FILE_PREFIX));
        assert!(files[0].ends_with(".log"));

        let written = std::fs::read_to_string(logs.join(&files[0])).unwrap();
        assert!(written.contains("loaded successfully"));
    }
}
