pub mod artifact;
pub mod predictor;
pub mod scaler;
pub mod smartcore_predictor;

pub use artifact::ScoringArtifact;
pub use predictor::PowerModel;
pub use scaler::StandardScaler;
pub use smartcore_predictor::{ForestRegressor, SmartCorePredictor};
