use super::predictor::PowerModel;
use super::scaler::StandardScaler;
use super::smartcore_predictor::SmartCorePredictor;
use crate::domain::errors::{ArtifactError, ScoringError};
use crate::domain::ml::FeatureVector;
use std::path::Path;
use tracing::info;

/// The fitted scaler and regression model, loaded once and shared read-only.
///
/// There is no mutation or reload path: hold it in an `Arc` and hand out references.
pub struct ScoringArtifact {
    scaler: StandardScaler,
    model: Box<dyn PowerModel>,
}

impl ScoringArtifact {
    pub fn new(scaler: StandardScaler, model: Box<dyn PowerModel>) -> Self {
        Self { scaler, model }
    }

    /// Load the persisted pair, model first. The model is smoke-tested on load,
    /// so a returned artifact is ready to score.
    pub fn load(model_path: &Path, scaler_path: &Path) -> Result<Self, ArtifactError> {
        let model = SmartCorePredictor::load(model_path)?;
        let scaler = StandardScaler::load(scaler_path)?;
        info!("Model and scaler loaded successfully.");

        Ok(Self::new(scaler, Box::new(model)))
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn model(&self) -> &dyn PowerModel {
        self.model.as_ref()
    }

    /// Scale, then predict. Returns the raw normalized model output.
    pub fn score(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
        let scaled = self.scaler.transform(features)?;
        self.model.predict(&scaled)
    }
}
