//! Observability for windcast
//!
//! Metrics are collected in-process and served in Prometheus text format on
//! `GET /metrics`. Logging setup lives in `infrastructure::logging`.

pub mod metrics;

pub use metrics::Metrics;
