use crate::application::ml::ScoringArtifact;
use crate::domain::errors::ScoringError;
use crate::domain::ml::FeatureVector;
use crate::domain::prediction::{PredictionResult, classify};
use std::sync::Arc;

/// Installed capacity of the farm in MW. The model predicts output as a fraction of it.
pub const MAX_POWER_OUTPUT_MW: f64 = 100.0;

/// Scale the features with the fitted scaler and run the model on them.
pub fn score(features: &FeatureVector, artifact: &ScoringArtifact) -> Result<f64, ScoringError> {
    artifact.score(features)
}

/// Normalized output to physical power. Out-of-range outputs are not clamped.
pub fn denormalize(normalized_output: f64) -> f64 {
    normalized_output * MAX_POWER_OUTPUT_MW
}

/// Scale → predict → denormalize → classify against a shared artifact.
#[derive(Clone)]
pub struct ScoringPipeline {
    artifact: Arc<ScoringArtifact>,
}

impl ScoringPipeline {
    pub fn new(artifact: Arc<ScoringArtifact>) -> Self {
        Self { artifact }
    }

    pub fn artifact(&self) -> &ScoringArtifact {
        &self.artifact
    }

    pub fn evaluate(&self, features: &FeatureVector) -> Result<PredictionResult, ScoringError> {
        let normalized_output = score(features, &self.artifact)?;
        Ok(PredictionResult {
            normalized_output,
            power_output_mw: denormalize(normalized_output),
            production_level: classify(normalized_output),
        })
    }
}
