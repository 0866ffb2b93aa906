//! windcast Server - Wind-farm power prediction API
//!
//! Loads the scaler/model pair once, then serves `POST /predict`,
//! `GET /health` and `GET /metrics`. Refuses to start if either artifact
//! is missing or unreadable.
//!
//! # Usage
//! ```sh
//! WINDCAST_MODEL_PATH=models/forest.json WINDCAST_SCALER_PATH=models/scaler.json \
//!     cargo run --bin windcast-server
//! ```
//!
//! # Environment Variables
//! - `WINDCAST_HOST` / `WINDCAST_PORT` - Listen address (default: 0.0.0.0:5000)
//! - `WINDCAST_MODEL_PATH` / `WINDCAST_SCALER_PATH` - Artifact files
//! - `WINDCAST_MODEL_VERSION` - Version reported in responses (default: 1.0)
//! - `OBSERVABILITY_ENABLED` - Serve `/metrics` (default: true)
//! - `LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `LOG_DIR` - Rolling log file directory, empty to disable (default: logs)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use windcast::application::ml::ScoringArtifact;
use windcast::application::prediction::PredictionService;
use windcast::config::Config;
use windcast::infrastructure::logging;
use windcast::infrastructure::observability::Metrics;
use windcast::interfaces::http::{self, AppState};

/// windcast prediction server
#[derive(Parser, Debug)]
#[command(name = "windcast-server", version)]
#[command(about = "Wind-farm power output prediction API")]
struct Args {
    /// Listen address, e.g. 127.0.0.1:8080 (overrides WINDCAST_HOST/WINDCAST_PORT)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Model file (overrides WINDCAST_MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Scaler file (overrides WINDCAST_SCALER_PATH)
    #[arg(long)]
    scaler: Option<PathBuf>,

    /// Number of worker threads
    #[arg(long, env = "WINDCAST_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(model) = args.model {
        config.artifacts.model_path = model;
    }
    if let Some(scaler) = args.scaler {
        config.artifacts.scaler_path = scaler;
    }
    let addr = match args.listen {
        Some(addr) => addr,
        None => config.server.socket_addr()?,
    };

    let _log_guard = logging::init(
        config.observability.log_format,
        config.observability.log_dir.as_deref(),
    )?;

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }
    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(config, addr))
}

async fn run_server(config: Config, addr: SocketAddr) -> Result<()> {
    info!(
        "Wind Power Prediction API {} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let artifact = match ScoringArtifact::load(
        &config.artifacts.model_path,
        &config.artifacts.scaler_path,
    ) {
        Ok(artifact) => Arc::new(artifact),
        Err(e) => {
            error!("Error loading model or scaler: {}", e);
            return Err(e).context("Scoring artifact unavailable, refusing to serve");
        }
    };

    let metrics = if config.observability.enabled {
        info!("Metrics endpoint enabled at /metrics");
        Some(Metrics::new()?)
    } else {
        info!("Metrics endpoint disabled.");
        None
    };

    let service = PredictionService::new(artifact, config.artifacts.model_version.clone());
    let app = http::router(Arc::new(AppState::new(service, metrics)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(
        "Serving model version {} on {}",
        config.artifacts.model_version, addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(http::shutdown::ctrl_c())
        .await
        .context("Server failed")?;

    info!("Shutdown complete.");
    Ok(())
}
