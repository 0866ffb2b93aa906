use super::response_assembler::{self, PredictionResponse, ResponseMeta};
use super::scoring_pipeline::ScoringPipeline;
use crate::application::ml::ScoringArtifact;
use crate::domain::errors::PredictionError;
use crate::domain::ml::FeatureVector;
use crate::domain::validation::InputValidator;
use crate::domain::wind;
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

/// Runs one request through validate → derive → score → classify → assemble.
///
/// Stateless apart from the shared artifact; safe to call from any number of
/// request handlers at once.
#[derive(Clone)]
pub struct PredictionService {
    pipeline: ScoringPipeline,
    model_version: String,
}

impl PredictionService {
    pub fn new(artifact: Arc<ScoringArtifact>, model_version: impl Into<String>) -> Self {
        Self {
            pipeline: ScoringPipeline::new(artifact),
            model_version: model_version.into(),
        }
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    pub fn predict(
        &self,
        payload: &Value,
        request_id: Option<&str>,
    ) -> Result<PredictionResponse, PredictionError> {
        self.predict_with(InputValidator::for_today(), payload, request_id)
    }

    /// Same as `predict` with an explicit validator (fixed year bound).
    ///
    /// Panics inside the pipeline are caught here and reported as
    /// `PredictionError::Unknown`, so they never reach the transport layer.
    pub fn predict_with(
        &self,
        validator: InputValidator,
        payload: &Value,
        request_id: Option<&str>,
    ) -> Result<PredictionResponse, PredictionError> {
        let span = info_span!(
            "prediction",
            correlation_id = %Uuid::new_v4(),
            request_id = request_id.unwrap_or(response_assembler::REQUEST_ID_FALLBACK)
        );
        let _guard = span.enter();

        match panic::catch_unwind(AssertUnwindSafe(|| self.run(validator, payload, request_id))) {
            Ok(result) => result,
            Err(cause) => {
                let message = panic_message(cause.as_ref());
                error!("Error processing prediction request: {}", message);
                Err(PredictionError::Unknown(message))
            }
        }
    }

    fn run(
        &self,
        validator: InputValidator,
        payload: &Value,
        request_id: Option<&str>,
    ) -> Result<PredictionResponse, PredictionError> {
        info!("Received prediction request with data: {}", payload);

        let request = validator.validate(payload).map_err(|e| {
            warn!("Invalid input data: {}", e);
            e
        })?;

        let features = FeatureVector::from_request(&request);
        let wind_10m = wind::derive(request.u10, request.v10);
        let wind_100m = wind::derive(request.u100, request.v100);

        let result = self.pipeline.evaluate(&features).map_err(|e| {
            error!(
                model = self.pipeline.artifact().model().name(),
                features = ?features,
                "Error processing prediction request: {}",
                e
            );
            e
        })?;

        info!(
            "Successful prediction: {:.4} (normalized), {:.2} MW",
            result.normalized_output, result.power_output_mw
        );

        Ok(response_assembler::assemble(
            &request,
            wind_10m,
            wind_100m,
            &result,
            ResponseMeta::new(&self.model_version, request_id),
        ))
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic in prediction pipeline".to_string()
    }
}
