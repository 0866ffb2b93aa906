//! Graceful-shutdown trigger for `axum::serve`.

use std::fmt::Display;
use std::future::Future;

use tracing::{error, info};

/// Resolve once `signal` fires. A signal that fails to install never
/// resolves, so the server keeps running instead of shutting down at once.
pub async fn wait_for<F, E>(signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = signal.await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received. Exiting...");
}

/// Wait for ctrl-c.
pub async fn ctrl_c() {
    wait_for(tokio::signal::ctrl_c()).await
}
