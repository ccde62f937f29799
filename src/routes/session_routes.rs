//! Sign-in and logout.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::middleware::auth::attach_token;
use crate::models::MessageResponse;
use crate::state::AppState;
use crate::utils::cookies::clear_session_cookie;
use crate::utils::http_helpers::HTTPError;

/// Registers session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signin", post(signin))
        .route("/logout", post(logout))
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

/// Checks the credentials against the store and hands out a session token.
///
/// Unknown user is a 400, a wrong password a 401.
async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, HTTPError> {
    let Json(credentials) = payload?;

    let Some(smoker) = state.store.get(&credentials.username).await else {
        warn!(
            event_name = "session.signin.unknown_user",
            event_domain = "session",
            username = credentials.username.as_str(),
            "sign-in for unknown user"
        );
        return Err(HTTPError::new(
            StatusCode::BAD_REQUEST,
            format!("no smoker named '{}'", credentials.username),
        ));
    };

    if !smoker.password_matches(&credentials.password) {
        warn!(
            event_name = "session.signin.bad_password",
            event_domain = "session",
            username = smoker.id.as_str(),
            "sign-in with wrong password"
        );
        return Err(HTTPError::status(StatusCode::UNAUTHORIZED));
    }

    let token = state.tokener.issue(&smoker.id).map_err(|e| {
        error!(
            event_name = "session.signin.issue_failed",
            event_domain = "session",
            username = smoker.id.as_str(),
            error = %e,
            "failed to issue token"
        );
        HTTPError::status(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    info!(
        event_name = "session.signin.succeeded",
        event_domain = "session",
        username = smoker.id.as_str(),
        "user signed in"
    );

    let mut headers = HeaderMap::new();
    attach_token(&mut headers, &state.config.jwt, &token);
    Ok((
        StatusCode::OK,
        headers,
        Json(MessageResponse::new("Signed in", smoker.id)),
    ))
}

/// Expires the session cookie. The token itself stays valid until its expiry;
/// sessions are not tracked server-side.
async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, HTTPError> {
    let cookie = clear_session_cookie(&state.config.jwt.cookie_name).map_err(|e| {
        error!(
            event_name = "session.logout.cookie_invalid",
            event_domain = "session",
            error = %e,
            "could not build clearing cookie"
        );
        HTTPError::status(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(MessageResponse::new("Signed out", "")),
    ))
}
