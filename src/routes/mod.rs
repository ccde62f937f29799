//! HTTP route definitions and handlers.
//!
//! Endpoints are grouped by concern: landing page, sessions, smoker records,
//! health and metrics. Static assets are served from disk under the configured
//! prefix.

mod health_routes;
mod home_routes;
mod metrics_routes;
mod session_routes;
mod smoker_routes;

use std::time::Duration;

use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::middleware::{jwt_auth, log_requests};
use crate::state::AppState;

/// Creates the application router with all configured routes.
///
/// Layers, outermost first: request timeout, access log, auth gate. The
/// logger wraps the auth gate so rejected requests are logged and counted too.
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .merge(home_routes::routes())
        .merge(session_routes::routes())
        .merge(smoker_routes::routes())
        .merge(health_routes::routes())
        .merge(metrics_routes::routes());

    let static_prefix = config.access.static_prefix.trim_end_matches('/');
    if !static_prefix.is_empty() {
        router = router.nest_service(static_prefix, ServeDir::new(&config.static_dir));
    }

    router
        .layer(from_fn_with_state(state.clone(), jwt_auth))
        .layer(from_fn_with_state(state.clone(), log_requests))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state)
}
