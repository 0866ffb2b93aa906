use crate::domain::prediction::types::PredictionRequest;
use crate::domain::wind;
use serde::Serialize;

pub const FEATURE_COUNT: usize = 10;

/// Ordered list of feature names.
/// This order MUST match exactly with the column order the scaler and model were fit on.
/// Scalers operate positionally: any change here is a breaking change for the artifacts.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "u10",
    "v10",
    "u100",
    "v100",
    "hour",
    "day",
    "month",
    "year",
    "wind_speed_10m",
    "wind_speed_100m",
];

/// Model input for a single observation.
///
/// Fields are private so a vector can only be built from a validated request,
/// and `to_array` is the single place that fixes the column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    u10: f64,
    v10: f64,
    u100: f64,
    v100: f64,
    hour: f64,
    day: f64,
    month: f64,
    year: f64,
    wind_speed_10m: f64,
    wind_speed_100m: f64,
}

impl FeatureVector {
    pub fn from_request(request: &PredictionRequest) -> Self {
        Self {
            u10: request.u10,
            v10: request.v10,
            u100: request.u100,
            v100: request.v100,
            hour: f64::from(request.hour),
            day: f64::from(request.day),
            month: f64::from(request.month),
            year: f64::from(request.year),
            wind_speed_10m: wind::wind_speed(request.u10, request.v10),
            wind_speed_100m: wind::wind_speed(request.u100, request.v100),
        }
    }

    /// Values in `FEATURE_NAMES` order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.u10,
            self.v10,
            self.u100,
            self.v100,
            self.hour,
            self.day,
            self.month,
            self.year,
            self.wind_speed_10m,
            self.wind_speed_100m,
        ]
    }

    pub fn columns(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }

    pub fn wind_speed_10m(&self) -> f64 {
        self.wind_speed_10m
    }

    pub fn wind_speed_100m(&self) -> f64 {
        self.wind_speed_100m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> PredictionRequest {
        PredictionRequest {
            u10: 3.0,
            v10: 4.0,
            u100: 6.0,
            v100: 8.0,
            hour: 12,
            day: 15,
            month: 6,
            year: 2023,
        }
    }

    #[test]
    fn test_feature_vector_length() {
        let fv = FeatureVector::from_request(&sample_request());
        assert_eq!(fv.to_array().len(), FEATURE_NAMES.len());
        assert_eq!(fv.columns().count(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_consistency() {
        let fv = FeatureVector::from_request(&sample_request());
        let values = fv.to_array();
        // u10 is index 0
        assert_eq!(values[0], 3.0);
        // year is index 7
        assert_eq!(values[7], 2023.0);
        // Derived speeds close the vector
        assert_eq!(values[8], 5.0);
        assert_eq!(values[9], 10.0);
    }

    #[test]
    fn test_columns_pair_names_with_values() {
        let fv = FeatureVector::from_request(&sample_request());
        let hour = fv.columns().find(|(name, _)| *name == "hour").map(|(_, v)| v);
        assert_eq!(hour, Some(12.0));
        let names: Vec<&str> = fv.columns().map(|(name, _)| name).collect();
        assert_eq!(names, FEATURE_NAMES.to_vec());
    }
}
