//! Metrics collection and exposition for Prometheus.
//!
//! HTTP request and auth decision counters, rendered by `GET /metrics`.

mod recorder;

pub use recorder::{AuthOutcome, Metrics, MetricsRecorder};
