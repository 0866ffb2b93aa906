use crate::domain::errors::{ArtifactError, ScoringError};
use crate::domain::ml::{FEATURE_NAMES, FeatureVector};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{error, info, warn};

const KIND: &str = "Scaler";

/// Fitted standardization parameters, applied column by column as `(x - mean) / scale`.
///
/// The parameters come from training time and are never refit here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(feature_names: Vec<String>, mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        let scaler = Self {
            feature_names,
            mean,
            scale,
        };
        scaler.check_parameters()?;
        Ok(scaler)
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            error!("Scaler file not found at {:?}", path);
            return Err(ArtifactError::NotFound {
                kind: KIND,
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|source| ArtifactError::Io {
            kind: KIND,
            path: path.to_path_buf(),
            source,
        })?;

        let scaler: StandardScaler =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                error!("Failed to deserialize scaler: {}", source);
                ArtifactError::Deserialize {
                    kind: KIND,
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        scaler.check_parameters()?;

        if let Err(e) = scaler.check_columns() {
            // Startup still succeeds; every request will fail with this error
            warn!("Scaler at {:?} does not match the feature layout: {}", path, e);
        }

        info!(
            "Successfully loaded scaler from {:?} ({} features)",
            path,
            scaler.n_features()
        );
        Ok(scaler)
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Scale one feature vector. Fails instead of guessing when the fitted
    /// columns differ from `FEATURE_NAMES` in count, name or order.
    pub fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>, ScoringError> {
        self.check_columns()?;

        features
            .columns()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|((column, value), (mean, scale))| {
                // Constant columns are fitted with a zero scale
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                let scaled = (value - mean) / scale;
                if scaled.is_finite() {
                    Ok(scaled)
                } else {
                    Err(ScoringError::NonFinite {
                        column: column.to_string(),
                    })
                }
            })
            .collect()
    }

    pub fn check_columns(&self) -> Result<(), ScoringError> {
        if self.n_features() != FEATURE_NAMES.len() {
            return Err(ScoringError::ShapeMismatch {
                expected: self.n_features(),
                actual: FEATURE_NAMES.len(),
            });
        }
        for (index, (expected, actual)) in self.feature_names.iter().zip(FEATURE_NAMES).enumerate() {
            if expected != actual {
                return Err(ScoringError::ColumnMismatch {
                    index,
                    expected: expected.clone(),
                    actual: actual.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_parameters(&self) -> Result<(), ArtifactError> {
        let n = self.feature_names.len();
        if n == 0 {
            return Err(ArtifactError::Invalid {
                kind: KIND,
                reason: "no feature columns".to_string(),
            });
        }
        if self.mean.len() != n || self.scale.len() != n {
            return Err(ArtifactError::Invalid {
                kind: KIND,
                reason: format!(
                    "{} feature names but {} means and {} scales",
                    n,
                    self.mean.len(),
                    self.scale.len()
                ),
            });
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(ArtifactError::Invalid {
                kind: KIND,
                reason: "non-finite mean or scale".to_string(),
            });
        }
        Ok(())
    }
}
