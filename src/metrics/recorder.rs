//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// What the auth middleware decided for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Exempt,
    Missing,
    Malformed,
    BadSignature,
    Expired,
    Invalid,
    Forbidden,
    Allowed,
    Refreshed,
    RefreshFailed,
}

impl AuthOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthOutcome::Exempt => "exempt",
            AuthOutcome::Missing => "missing",
            AuthOutcome::Malformed => "malformed",
            AuthOutcome::BadSignature => "bad_signature",
            AuthOutcome::Expired => "expired",
            AuthOutcome::Invalid => "invalid",
            AuthOutcome::Forbidden => "forbidden",
            AuthOutcome::Allowed => "allowed",
            AuthOutcome::Refreshed => "refreshed",
            AuthOutcome::RefreshFailed => "refresh_failed",
        }
    }
}

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records a finished HTTP request.
    fn record_request(&self, method: &str, status: u16, duration_secs: f64);

    /// Records a decision taken by the auth middleware.
    fn record_auth(&self, outcome: AuthOutcome);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    http_requests_total: CounterVec,
    http_request_duration_seconds: HistogramVec,

    auth_decisions_total: CounterVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let http_requests_total = register_counter_vec_with_registry!(
            Opts::new("http_requests_total", "Total number of HTTP requests served"),
            &["method", "status"],
            registry.clone()
        )
        .expect("Failed to register http_requests_total");

        let http_request_duration_seconds = register_histogram_vec_with_registry!(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
            &["method"],
            vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
            registry.clone()
        )
        .expect("Failed to register http_request_duration_seconds");

        let auth_decisions_total = register_counter_vec_with_registry!(
            Opts::new(
                "auth_decisions_total",
                "Auth middleware decisions by outcome"
            ),
            &["outcome"],
            registry.clone()
        )
        .expect("Failed to register auth_decisions_total");

        Metrics {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            auth_decisions_total,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("Failed to encode metrics: {}", e))?;
        String::from_utf8(buffer).map_err(|e| format!("Metrics encoding produced invalid UTF-8: {}", e))
    }
}

impl MetricsRecorder for Metrics {
    fn record_request(&self, method: &str, status: u16, duration_secs: f64) {
        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, status.as_str()])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[method])
            .observe(duration_secs);
    }

    fn record_auth(&self, outcome: AuthOutcome) {
        self.auth_decisions_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }
}
