//! Access log for every request.
//!
//! The outcome is read off the response the inner stack hands back, so the
//! status logged is exactly the one written to the client.

use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::metrics::MetricsRecorder;
use crate::state::AppState;

/// Log severity class of a finished request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    ServerError,
    ClientError,
    Slow,
    Completed,
}

/// Status classes take precedence over slowness.
pub fn classify(status: StatusCode, elapsed: Duration, slow_threshold: Duration) -> RequestOutcome {
    if status.is_server_error() {
        RequestOutcome::ServerError
    } else if status.is_client_error() {
        RequestOutcome::ClientError
    } else if elapsed > slow_threshold {
        RequestOutcome::Slow
    } else {
        RequestOutcome::Completed
    }
}

pub async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = Uuid::new_v4().to_string();

    debug!(
        event_name = "http.request.started",
        event_domain = "http",
        request_id = request_id.as_str(),
        method = method.as_str(),
        path = path.as_str(),
        "request started"
    );

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status();
    state
        .metrics
        .record_request(method.as_str(), status.as_u16(), elapsed.as_secs_f64());

    let slow_threshold = Duration::from_millis(state.config.logging.slow_request_ms);
    let duration_ms = elapsed.as_secs_f64() * 1000.0;
    macro_rules! log_outcome {
        ($level:ident, $name:literal, $msg:literal) => {
            $level!(
                event_name = $name,
                event_domain = "http",
                request_id = request_id.as_str(),
                method = method.as_str(),
                path = path.as_str(),
                status = status.as_u16(),
                duration_ms,
                $msg
            )
        };
    }
    match classify(status, elapsed, slow_threshold) {
        RequestOutcome::ServerError => log_outcome!(error, "http.request.failed", "request failed"),
        RequestOutcome::ClientError => {
            log_outcome!(warn, "http.request.rejected", "request rejected")
        }
        RequestOutcome::Slow => log_outcome!(warn, "http.request.slow", "slow request"),
        RequestOutcome::Completed => {
            log_outcome!(info, "http.request.completed", "request completed")
        }
    }

    response
}
