use super::predictor::PowerModel;
use crate::domain::errors::{ArtifactError, ScoringError};
use crate::domain::ml::FEATURE_COUNT;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::any::Any;
use std::fs::File;
use std::io::BufReader;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub type ForestRegressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

const KIND: &str = "Model";

/// Random forest regressor persisted as serde JSON.
pub struct SmartCorePredictor {
    model: ForestRegressor,
    model_path: Option<PathBuf>,
}

impl SmartCorePredictor {
    /// Load a fitted forest. A missing, unreadable or unusable file is an error,
    /// never a neutral fallback.
    pub fn load(model_path: &Path) -> Result<Self, ArtifactError> {
        if !model_path.exists() {
            error!("ML model file not found at {:?}", model_path);
            return Err(ArtifactError::NotFound {
                kind: KIND,
                path: model_path.to_path_buf(),
            });
        }

        let file = File::open(model_path).map_err(|source| ArtifactError::Io {
            kind: KIND,
            path: model_path.to_path_buf(),
            source,
        })?;

        let model: ForestRegressor =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                error!("Failed to deserialize ML model: {}", source);
                ArtifactError::Deserialize {
                    kind: KIND,
                    path: model_path.to_path_buf(),
                    source,
                }
            })?;

        let predictor = Self {
            model,
            model_path: Some(model_path.to_path_buf()),
        };
        // Any JSON object deserializes into an empty forest, which only fails on first use
        predictor.smoke_test().map_err(|reason| {
            error!("ML model at {:?} is not usable: {}", model_path, reason);
            ArtifactError::Invalid { kind: KIND, reason }
        })?;

        info!("Successfully loaded ML model from {:?}", model_path);
        Ok(predictor)
    }

    /// Wrap an in-memory forest.
    pub fn from_model(model: ForestRegressor) -> Self {
        Self {
            model,
            model_path: None,
        }
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    /// Score an all-zero row once.
    fn smoke_test(&self) -> Result<(), String> {
        let row = [0.0; FEATURE_COUNT];
        match panic::catch_unwind(AssertUnwindSafe(|| self.predict(&row))) {
            Ok(Ok(value)) if value.is_finite() => Ok(()),
            Ok(Ok(value)) => Err(format!("smoke prediction returned {}", value)),
            Ok(Err(e)) => Err(e.to_string()),
            Err(cause) => Err(format!("smoke prediction panicked: {}", panic_text(cause.as_ref()))),
        }
    }
}

fn panic_text(cause: &(dyn Any + Send)) -> &str {
    if let Some(s) = cause.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown cause"
    }
}

impl PowerModel for SmartCorePredictor {
    fn predict(&self, scaled_features: &[f64]) -> Result<f64, ScoringError> {
        let input_matrix = DenseMatrix::from_2d_vec(&vec![scaled_features.to_vec()]).map_err(
            |e| ScoringError::Model {
                reason: format!("Matrix creation failed: {}", e),
            },
        )?;

        let predictions = self
            .model
            .predict(&input_matrix)
            .map_err(|e| ScoringError::Model {
                reason: format!("Prediction failed: {}", e),
            })?;

        predictions.first().copied().ok_or_else(|| ScoringError::Model {
            reason: "No prediction returned".to_string(),
        })
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }
}
