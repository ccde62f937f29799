//! Reading and writing the session cookie.
//!
//! The cookie value is the full `Bearer <jwt>` credential. It contains a space,
//! so it is written quoted and unquoted again when read back.

use axum::http::header::{InvalidHeaderValue, COOKIE};
use axum::http::{HeaderMap, HeaderValue};

/// Find the value of cookie `name` across all `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            if key.trim() == name {
                Some(unquote(val.trim()).to_string())
            } else {
                None
            }
        })
}

/// `Set-Cookie` value carrying `Bearer <token>` for `max_age_secs` seconds.
pub fn session_cookie(
    name: &str,
    token: &str,
    max_age_secs: i64,
) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}=\"Bearer {token}\"; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    ))
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_session_cookie(name: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
    ))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
