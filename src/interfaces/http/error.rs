//! Error envelopes of the HTTP surface.

use crate::application::prediction::response_assembler::iso_timestamp;
use crate::domain::errors::PredictionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Generic text returned with every 5xx, next to the error's own message
pub const INTERNAL_ERROR_TEXT: &str = "Failed to process prediction request";

/// 400 body: `{"error": message}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 500 body: `{"error", "message", "timestamp"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalErrorBody {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: self.to_string(),
                }),
            )
                .into_response()
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InternalErrorBody {
                    error: INTERNAL_ERROR_TEXT.to_string(),
                    message: self.to_string(),
                    timestamp: iso_timestamp(),
                }),
            )
                .into_response()
        }
    }
}
