//! Token gate in front of the routes.
//!
//! Per request: exempt check, credential extraction (session cookie first,
//! then the `Authorization` header), verification, permission check, sliding
//! refresh when the token is about to expire, and finally identity injection.
//! Every rejection writes the terminal response itself; nothing downstream runs.

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info, warn};

use crate::auth::{Claims, TokenError};
use crate::config::JWTConfig;
use crate::metrics::{AuthOutcome, MetricsRecorder};
use crate::models::Identity;
use crate::state::AppState;
use crate::utils::cookies::{read_cookie, session_cookie};
use crate::utils::http_helpers::HTTPError;

struct Rejection {
    outcome: AuthOutcome,
    status: StatusCode,
}

impl Rejection {
    fn new(outcome: AuthOutcome, status: StatusCode) -> Self {
        Self { outcome, status }
    }
}

pub async fn jwt_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();

    if state.tokener.is_exempt(&path) {
        state.metrics.record_auth(AuthOutcome::Exempt);
        return next.run(request).await;
    }

    let claims = match authenticate(&state, request.headers(), &path) {
        Ok(claims) => claims,
        Err(rejection) => {
            state.metrics.record_auth(rejection.outcome);
            return HTTPError::status(rejection.status).into_response();
        }
    };
    state.metrics.record_auth(AuthOutcome::Allowed);

    let refreshed = if needs_refresh(&claims, Utc::now(), state.config.jwt.refresh_window) {
        refresh(&state, &claims.username)
    } else {
        None
    };

    request
        .extensions_mut()
        .insert(Identity::new(claims.username));
    let mut response = next.run(request).await;

    if let Some(token) = refreshed {
        attach_token(response.headers_mut(), &state.config.jwt, &token);
    }
    response
}

fn authenticate(state: &AppState, headers: &HeaderMap, path: &str) -> Result<Claims, Rejection> {
    let Some(credential) = extract_credential(headers, &state.config.jwt.cookie_name) else {
        debug!(
            event_name = "auth.credential.missing",
            event_domain = "auth",
            path,
            "no session cookie or authorization header"
        );
        return Err(Rejection::new(AuthOutcome::Missing, StatusCode::UNAUTHORIZED));
    };

    let Some(token) = parse_bearer(&credential) else {
        debug!(
            event_name = "auth.credential.malformed",
            event_domain = "auth",
            path,
            "credential is not of the form 'Bearer <token>'"
        );
        return Err(Rejection::new(AuthOutcome::Malformed, StatusCode::UNAUTHORIZED));
    };

    let claims = state.tokener.verify(token).map_err(|e| {
        warn!(
            event_name = "auth.token.rejected",
            event_domain = "auth",
            path,
            error = %e,
            "token rejected"
        );
        match e {
            TokenError::InvalidSignature => {
                Rejection::new(AuthOutcome::BadSignature, StatusCode::UNAUTHORIZED)
            }
            TokenError::Expired => Rejection::new(AuthOutcome::Expired, StatusCode::UNAUTHORIZED),
            TokenError::Malformed(_) => Rejection::new(AuthOutcome::Invalid, StatusCode::BAD_REQUEST),
            TokenError::Signing(_) => {
                Rejection::new(AuthOutcome::Invalid, StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    })?;

    if !state.tokener.is_authorized(&claims.username, path) {
        warn!(
            event_name = "auth.access.denied",
            event_domain = "auth",
            username = claims.username.as_str(),
            path,
            "user lacks the permission required for this path"
        );
        return Err(Rejection::new(AuthOutcome::Forbidden, StatusCode::FORBIDDEN));
    }

    Ok(claims)
}

/// The session cookie wins over the `Authorization` header when both are sent.
fn extract_credential(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    read_cookie(headers, cookie_name)
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
        .filter(|value| !value.trim().is_empty())
}

/// Exactly two whitespace-separated parts, the first being "Bearer".
fn parse_bearer(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("Bearer") => Some(token),
        _ => None,
    }
}

/// Refresh only inside the open window (0, window): expired tokens never qualify.
pub fn needs_refresh(claims: &Claims, now: DateTime<Utc>, window_secs: i64) -> bool {
    let remaining = claims.time_until_expiry(now);
    remaining > Duration::zero() && remaining < Duration::seconds(window_secs)
}

/// A failed refresh is logged and otherwise ignored; the request still goes through.
fn refresh(state: &AppState, username: &str) -> Option<String> {
    match state.tokener.issue(username) {
        Ok(token) => {
            state.metrics.record_auth(AuthOutcome::Refreshed);
            info!(
                event_name = "auth.token.refreshed",
                event_domain = "auth",
                username,
                "token close to expiry, issued a new one"
            );
            Some(token)
        }
        Err(e) => {
            state.metrics.record_auth(AuthOutcome::RefreshFailed);
            error!(
                event_name = "auth.token.refresh_failed",
                event_domain = "auth",
                username,
                error = %e,
                "failed to refresh token"
            );
            None
        }
    }
}

/// Hands a token to the client both as the session cookie and as a bearer header.
pub fn attach_token(headers: &mut HeaderMap, jwt: &JWTConfig, token: &str) {
    match session_cookie(&jwt.cookie_name, token, jwt.exp) {
        Ok(cookie) => {
            headers.append(SET_COOKIE, cookie);
        }
        Err(e) => error!(
            event_name = "auth.cookie.invalid",
            event_domain = "auth",
            error = %e,
            "could not build session cookie"
        ),
    }
    match HeaderValue::from_str(&format!("Bearer {}", token)) {
        Ok(bearer) => {
            headers.insert(AUTHORIZATION, bearer);
        }
        Err(e) => error!(
            event_name = "auth.header.invalid",
            event_domain = "auth",
            error = %e,
            "could not build authorization header"
        ),
    }
}
