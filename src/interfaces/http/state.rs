//! Shared state of the HTTP surface.

use crate::application::prediction::PredictionService;
use crate::infrastructure::observability::Metrics;

/// Shared application state.
pub struct AppState {
    /// Prediction pipeline bound to the loaded artifact.
    pub service: PredictionService,

    /// Metrics registry, `None` when observability is disabled.
    pub metrics: Option<Metrics>,
}

impl AppState {
    pub fn new(service: PredictionService, metrics: Option<Metrics>) -> Self {
        Self { service, metrics }
    }
}
