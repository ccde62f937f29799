use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use http::request::Parts;
use tracing::warn;

use crate::utils::http_helpers::HTTPError;

/// The verified caller of a request, placed into the request extensions by
/// the auth middleware once the token has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

impl Identity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Handlers take `Identity` as an argument to require an authenticated caller.
/// On exempt paths the middleware injects nothing, so extraction fails with 401.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = HTTPError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(identity) => Ok(identity.clone()),
            None => {
                warn!(
                    event_name = "auth.identity.missing",
                    event_domain = "auth",
                    path = parts.uri.path(),
                    "handler requires an identity but none was injected"
                );
                Err(HTTPError::status(StatusCode::UNAUTHORIZED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extracts_injected_identity() {
        let mut request = Request::builder().uri("/smokers").body(()).unwrap();
        request.extensions_mut().insert(Identity::new("arthur"));
        let (mut parts, _) = request.into_parts();

        let identity = Identity::from_request_parts(&mut parts, &()).await.ok();
        assert_eq!(identity, Some(Identity::new("arthur")));
    }

    #[tokio::test]
    async fn test_missing_identity_is_rejected() {
        let request = Request::builder().uri("/smokers").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let result = Identity::from_request_parts(&mut parts, &()).await;
        assert_eq!(
            result.err().map(|e| e.status_code()),
            Some(StatusCode::UNAUTHORIZED)
        );
    }
}
