use std::path::PathBuf;
use thiserror::Error;

/// Client-input failures raised before any feature is derived
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Field {field} must be numeric")]
    TypeError { field: &'static str },

    #[error("{label} must be between {min} and {max}")]
    RangeError {
        field: &'static str,
        label: &'static str,
        min: i64,
        max: i64,
    },

    #[error("Invalid data format: {detail}")]
    FormatError { detail: String },
}

impl ValidationError {
    /// Name of the offending request field, when the failure is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::TypeError { field }
            | ValidationError::RangeError { field, .. } => Some(*field),
            ValidationError::FormatError { .. } => None,
        }
    }
}

/// Errors raised while loading the scaler/model pair at startup
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{kind} file not found at {path:?}")]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("Failed to read {kind} file {path:?}: {source}")]
    Io {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize {kind} from {path:?}: {source}")]
    Deserialize {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {kind} artifact: {reason}")]
    Invalid { kind: &'static str, reason: String },
}

/// Errors raised while scaling or scoring a feature vector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Feature shape mismatch: scaler expects {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Feature order mismatch at column {index}: scaler expects '{expected}', got '{actual}'")]
    ColumnMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Scaled value for column '{column}' is not finite")]
    NonFinite { column: String },

    #[error("Model prediction failed: {reason}")]
    Model { reason: String },
}

/// Everything the prediction pipeline can report back to its caller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("{0}")]
    Unknown(String),
}

impl PredictionError {
    /// Validation failures are the caller's fault; everything else is ours.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictionError::Validation(_))
    }
}
