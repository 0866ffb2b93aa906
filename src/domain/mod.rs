// Domain-specific error types
pub mod errors;

// Feature layout shared with the training artifacts
pub mod ml;

// Prediction types and production-level classification
pub mod prediction;

// Request validation
pub mod validation;

// Wind speed / direction derivation
pub mod wind;
