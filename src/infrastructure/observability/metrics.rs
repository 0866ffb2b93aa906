//! Prometheus metrics definitions for windcast
//!
//! All metrics use the `windcast_` prefix.

use crate::domain::prediction::ProductionLevel;
use prometheus::{CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Prometheus metrics for the prediction service
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Prediction requests by outcome (success, invalid, error)
    pub predictions_total: CounterVec,
    /// Successful predictions by production level
    pub production_level_total: CounterVec,
    /// Time spent in the prediction pipeline
    pub prediction_latency_seconds: Histogram,
    /// Power output of the most recent successful prediction
    pub last_power_output_mw: Gauge,
}

impl Metrics {
    /// Create a new Metrics instance with all series registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let predictions_total = CounterVec::new(
            Opts::new(
                "windcast_predictions_total",
                "Prediction requests by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let production_level_total = CounterVec::new(
            Opts::new(
                "windcast_production_level_total",
                "Successful predictions by production level",
            ),
            &["level"],
        )?;
        registry.register(Box::new(production_level_total.clone()))?;

        let prediction_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "windcast_prediction_latency_seconds",
                "Time spent validating, scoring and assembling a prediction",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        )?;
        registry.register(Box::new(prediction_latency_seconds.clone()))?;

        let last_power_output_mw = Gauge::with_opts(Opts::new(
            "windcast_last_power_output_mw",
            "Power output of the most recent successful prediction in MW",
        ))?;
        registry.register(Box::new(last_power_output_mw.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            predictions_total,
            production_level_total,
            prediction_latency_seconds,
            last_power_output_mw,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn record_success(&self, level: ProductionLevel, power_output_mw: f64, elapsed_secs: f64) {
        self.predictions_total.with_label_values(&["success"]).inc();
        self.production_level_total
            .with_label_values(&[level.as_str()])
            .inc();
        self.last_power_output_mw.set(power_output_mw);
        self.prediction_latency_seconds.observe(elapsed_secs);
    }

    pub fn record_invalid(&self) {
        self.predictions_total.with_label_values(&["invalid"]).inc();
    }

    pub fn record_error(&self) {
        self.predictions_total.with_label_values(&["error"]).inc();
    }
}
