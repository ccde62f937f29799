//! Public landing page.

use crate::state::AppState;
use axum::{routing::get, Router};

const WELCOME: &str = "This service is for people who are quitting smoking!";

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}

async fn home() -> &'static str {
    WELCOME
}
