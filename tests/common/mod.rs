#![allow(dead_code)]

use serde_json::{Value, json};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use windcast::application::ml::{PowerModel, ScoringArtifact, StandardScaler};
use windcast::application::prediction::PredictionService;
use windcast::domain::errors::ScoringError;
use windcast::domain::ml::FEATURE_NAMES;
use windcast::domain::wind::wind_speed;

pub fn feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|n| n.to_string()).collect()
}

/// Reference observation: 5 m/s at 10 m, 10 m/s at 100 m.
pub fn reference_payload() -> Value {
    json!({
        "u10": 3, "v10": 4, "u100": 6, "v100": 8,
        "hour": 12, "day": 15, "month": 6, "year": 2023
    })
}

/// Returns the scaled 100 m wind speed, i.e. `speed / 25` with `speed_scaler`.
pub struct SpeedModel;

impl PowerModel for SpeedModel {
    fn predict(&self, scaled_features: &[f64]) -> Result<f64, ScoringError> {
        scaled_features
            .get(9)
            .copied()
            .ok_or_else(|| ScoringError::Model {
                reason: "short row".to_string(),
            })
    }

    fn name(&self) -> &str {
        "speed"
    }
}

pub struct PanickingModel;

impl PowerModel for PanickingModel {
    fn predict(&self, _scaled_features: &[f64]) -> Result<f64, ScoringError> {
        panic!("corrupt tree")
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

/// Identity on every column except the 100 m speed, which is divided by 25.
pub fn speed_scaler() -> StandardScaler {
    let mut scale = vec![1.0; 10];
    scale[9] = 25.0;
    StandardScaler::new(feature_names(), vec![0.0; 10], scale).unwrap()
}

pub fn service_with(scaler: StandardScaler, model: Box<dyn PowerModel>) -> PredictionService {
    PredictionService::new(Arc::new(ScoringArtifact::new(scaler, model)), "1.0")
}

pub fn speed_service() -> PredictionService {
    service_with(speed_scaler(), Box::new(SpeedModel))
}

/// Synthetic observations in `FEATURE_NAMES` order with a production target
/// that grows with the 100 m wind speed.
fn training_rows() -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for i in 0..240usize {
        let u100 = ((i * 7) % 41) as f64 * 0.5 - 10.0;
        let v100 = ((i * 13) % 37) as f64 * 0.5 - 9.0;
        let u10 = u100 * 0.7;
        let v10 = v100 * 0.7;
        let row = vec![
            u10,
            v10,
            u100,
            v100,
            (i % 24) as f64,
            (i % 28 + 1) as f64,
            (i % 12 + 1) as f64,
            (2015 + i % 8) as f64,
            wind_speed(u10, v10),
            wind_speed(u100, v100),
        ];
        y.push((row[9] / 14.0).min(1.0));
        x.push(row);
    }
    (x, y)
}

fn fit_scaler(rows: &[Vec<f64>]) -> StandardScaler {
    let n = rows.len() as f64;
    let mut mean = vec![0.0; 10];
    let mut scale = vec![0.0; 10];
    for col in 0..10 {
        mean[col] = rows.iter().map(|r| r[col]).sum::<f64>() / n;
        let var = rows.iter().map(|r| (r[col] - mean[col]).powi(2)).sum::<f64>() / n;
        scale[col] = if var > 0.0 { var.sqrt() } else { 1.0 };
    }
    StandardScaler::new(feature_names(), mean, scale).unwrap()
}

/// Fit a small forest the way the training job does (scale, then fit) and
/// persist both artifacts into `dir`. Returns `(model_path, scaler_path)`.
pub fn write_forest_artifacts(dir: &Path) -> (PathBuf, PathBuf) {
    let (rows, target) = training_rows();
    let scaler = fit_scaler(&rows);
    let scaled: Vec<Vec<f64>> = rows
        .iter()
        .map(|r| {
            r.iter()
                .enumerate()
                .map(|(i, v)| (v - scaler.mean[i]) / scaler.scale[i])
                .collect()
        })
        .collect();

    let x = DenseMatrix::from_2d_vec(&scaled).unwrap();
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(30)
        .with_max_depth(8)
        .with_min_samples_split(2);
    let forest = RandomForestRegressor::fit(&x, &target, params).unwrap();

    let model_path = dir.join("wind_power_model.json");
    let scaler_path = dir.join("scaler.json");
    serde_json::to_writer(File::create(&model_path).unwrap(), &forest).unwrap();
    serde_json::to_writer(File::create(&scaler_path).unwrap(), &scaler).unwrap();
    (model_path, scaler_path)
}
