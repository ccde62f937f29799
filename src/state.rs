//! Shared application state.
//!
//! Contains the state that is shared across all request handlers,
//! including configuration, the auth capability, the record store and metrics.

use crate::auth::Tokener;
use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::store::SmokerStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers and middleware.
///
/// Cloned per request; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Token issuance/verification and access policy.
    pub tokener: Arc<dyn Tokener>,
    /// Smoker records, also used to check sign-in credentials.
    pub store: Arc<dyn SmokerStore>,
    pub metrics: Metrics,
}
