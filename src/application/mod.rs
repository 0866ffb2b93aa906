// Scaler/model artifacts and the model capability
pub mod ml;

// Inference pipeline and response contract
pub mod prediction;
