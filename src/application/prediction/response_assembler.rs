//! Output contract of the prediction endpoint.
//!
//! Rounding happens only here: the normalized output to 4 decimals, power and
//! wind values to 2. Nothing else is dropped.

use crate::domain::prediction::{PredictionRequest, PredictionResult, ProductionLevel};
use crate::domain::wind::WindComponents;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Value reported when the caller sent no `X-Request-ID` header
pub const REQUEST_ID_FALLBACK: &str = "not-provided";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub normalized_output: f64,
    pub power_output_mw: f64,
    pub production_level: ProductionLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSummary {
    /// Observation time, `YYYY-MM-DD HH:00:00`
    pub timestamp: String,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    pub wind_speed_100m: f64,
    pub wind_direction_100m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub model_version: String,
    /// When the response was produced (ISO-8601, local time)
    pub timestamp: String,
    pub request_id: String,
}

impl ResponseMeta {
    pub fn new(model_version: &str, request_id: Option<&str>) -> Self {
        Self {
            model_version: model_version.to_string(),
            timestamp: iso_timestamp(),
            request_id: request_id.unwrap_or(REQUEST_ID_FALLBACK).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: PredictionSummary,
    pub input_summary: InputSummary,
    pub meta: ResponseMeta,
}

pub fn assemble(
    request: &PredictionRequest,
    wind_10m: WindComponents,
    wind_100m: WindComponents,
    result: &PredictionResult,
    meta: ResponseMeta,
) -> PredictionResponse {
    PredictionResponse {
        prediction: PredictionSummary {
            normalized_output: round_to(result.normalized_output, 4),
            power_output_mw: round_to(result.power_output_mw, 2),
            production_level: result.production_level,
        },
        input_summary: InputSummary {
            timestamp: request.observation_timestamp(),
            wind_speed_10m: round_to(wind_10m.speed, 2),
            wind_direction_10m: round_to(wind_10m.direction_degrees, 2),
            wind_speed_100m: round_to(wind_100m.speed, 2),
            wind_direction_100m: round_to(wind_100m.direction_degrees, 2),
        },
        meta,
    }
}

/// Round to `places` decimals from the exact binary value, ties to even.
///
/// `0.125` sits exactly on a tie and becomes `0.12`; `2.675` is stored just
/// below its decimal form and becomes `2.67`.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Local wall-clock time with microseconds and no offset, e.g. `2024-03-01T14:05:09.123456`.
pub fn iso_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
