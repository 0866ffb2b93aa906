use crate::domain::errors::ScoringError;

/// Interface for trained regression models
///
/// Callers only rely on `predict`; any model (tree ensemble, linear, ...) that
/// maps a scaled feature row to a normalized output is substitutable.
pub trait PowerModel: Send + Sync {
    /// Predict normalized production (nominally 0.0 to 1.0) for one scaled feature row
    fn predict(&self, scaled_features: &[f64]) -> Result<f64, ScoringError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
