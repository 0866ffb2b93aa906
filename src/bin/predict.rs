//! One-off prediction from a request file, without starting the server.
//!
//! Prints the same JSON the `/predict` endpoint would return. Exits with 2 on
//! invalid input and 1 on internal failures.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use windcast::application::ml::ScoringArtifact;
use windcast::application::prediction::PredictionService;
use windcast::application::prediction::response_assembler::iso_timestamp;
use windcast::config::{DEFAULT_MODEL_PATH, DEFAULT_MODEL_VERSION, DEFAULT_SCALER_PATH};
use windcast::interfaces::http::error::{ErrorBody, INTERNAL_ERROR_TEXT, InternalErrorBody};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Request JSON file, or `-` to read from stdin
    input: PathBuf,

    /// Path to the model file
    #[arg(long, env = "WINDCAST_MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Path to the scaler file
    #[arg(long, env = "WINDCAST_SCALER_PATH", default_value = DEFAULT_SCALER_PATH)]
    scaler: PathBuf,

    /// Version reported in the response metadata
    #[arg(long, env = "WINDCAST_MODEL_VERSION", default_value = DEFAULT_MODEL_VERSION)]
    model_version: String,

    /// Request id reported in the response metadata
    #[arg(long)]
    request_id: Option<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let artifact = ScoringArtifact::load(&args.model, &args.scaler)
        .context("Failed to load scoring artifact")?;

    let raw = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read request from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read request file {:?}", args.input))?
    };

    let service = PredictionService::new(Arc::new(artifact), args.model_version);
    let outcome = match serde_json::from_str::<Value>(&raw) {
        Ok(payload) => service.predict(&payload, args.request_id.as_deref()),
        Err(e) => {
            let body = ErrorBody {
                error: format!("Invalid data format: {}", e),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
            std::process::exit(2);
        }
    };

    match outcome {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) if e.is_client_error() => {
            let body = ErrorBody {
                error: e.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
            std::process::exit(2);
        }
        Err(e) => {
            let body = InternalErrorBody {
                error: INTERNAL_ERROR_TEXT.to_string(),
                message: e.to_string(),
                timestamp: iso_timestamp(),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
            std::process::exit(1);
        }
    }
}
