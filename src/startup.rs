//! Application startup and server initialization.
//!
//! This module wires the token service, access policy, smoker store and
//! metrics into the shared state and runs the HTTP server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::auth::Auth;
use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::routes;
use crate::state::AppState;
use crate::store::create_store;

/// Builds the shared state, seeding the store from the config.
pub async fn build_state(config: Arc<ConfigV1>) -> AppState {
    let tokener = Arc::new(Auth::new(&config.jwt, &config.access));
    let store = create_store(&config.smokers).await;

    AppState {
        config,
        tokener,
        store,
        metrics: Metrics::new(),
    }
}

/// Initializes and runs the application server.
///
/// Binds to the address specified in the configuration and serves until
/// Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address
/// or encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config.clone()).await;
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!(
        event_name = "server.started",
        event_domain = "server",
        bind_address = config.bind_address.as_str(),
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(
        event_name = "server.stopped",
        event_domain = "server",
        "server shut down"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(
            event_name = "server.signal_failed",
            event_domain = "server",
            error = %e,
            "could not listen for Ctrl-C"
        );
        std::future::pending::<()>().await;
    }
}
