//! Prediction, health and metrics handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::state::AppState;
use crate::application::prediction::response_assembler::iso_timestamp;
use crate::domain::errors::{PredictionError, ValidationError};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub scaler_loaded: bool,
    pub timestamp: String,
}

/// POST /predict - Score one observation
pub async fn predict_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!("Invalid input data: {}", rejection.body_text());
            if let Some(metrics) = &state.metrics {
                metrics.record_invalid();
            }
            return PredictionError::from(ValidationError::FormatError {
                detail: rejection.body_text(),
            })
            .into_response();
        }
    };

    let started = Instant::now();
    match state.service.predict(&payload, request_id.as_deref()) {
        Ok(response) => {
            if let Some(metrics) = &state.metrics {
                metrics.record_success(
                    response.prediction.production_level,
                    response.prediction.power_output_mw,
                    started.elapsed().as_secs_f64(),
                );
            }
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            if let Some(metrics) = &state.metrics {
                if e.is_client_error() {
                    metrics.record_invalid();
                } else {
                    metrics.record_error();
                }
            }
            e.into_response()
        }
    }
}

/// GET /health - Liveness plus artifact status
///
/// `AppState` only exists around a loaded and smoke-tested artifact, so a
/// serving instance always reports both as loaded.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: true,
        scaler_loaded: true,
        timestamp: iso_timestamp(),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(metrics) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            metrics.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
