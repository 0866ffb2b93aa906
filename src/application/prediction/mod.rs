pub mod response_assembler;
pub mod scoring_pipeline;
pub mod service;

pub use response_assembler::{PredictionResponse, REQUEST_ID_FALLBACK};
pub use scoring_pipeline::{MAX_POWER_OUTPUT_MW, ScoringPipeline};
pub use service::PredictionService;
