use serde::{Deserialize, Serialize};
use std::fmt;

/// A request whose eight raw fields all passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRequest {
    pub u10: f64,
    pub v10: f64,
    pub u100: f64,
    pub v100: f64,
    pub hour: u32,
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl PredictionRequest {
    /// Observation time as `YYYY-MM-DD HH:00:00`.
    ///
    /// Plain formatting: day-of-month is not checked against the month length.
    pub fn observation_timestamp(&self) -> String {
        format!(
            "{}-{:02}-{:02} {:02}:00:00",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// Discrete production band of the normalized output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductionLevel {
    Low,
    Medium,
    High,
}

impl ProductionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionLevel::Low => "Low",
            ProductionLevel::Medium => "Medium",
            ProductionLevel::High => "High",
        }
    }
}

impl fmt::Display for ProductionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrounded outcome of scoring one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub normalized_output: f64,
    pub power_output_mw: f64,
    pub production_level: ProductionLevel,
}
