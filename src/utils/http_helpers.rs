use axum::extract::rejection::JsonRejection;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::store::StoreError;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
///
/// Rendered as a plain-text body. Server errors only ever expose the canonical
/// status text; client errors carry their message when one is given.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: Option<String>,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: Some(message.into()),
        }
    }

    /// An error whose body is just the status text, e.g. "Unauthorized".
    pub fn status(status: StatusCode) -> Self {
        HTTPError {
            status,
            message: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    fn body(&self) -> String {
        let status_text = self.status.canonical_reason().unwrap_or("Error");
        match &self.message {
            Some(message) if !self.status.is_server_error() => message.clone(),
            _ => status_text.to_string(),
        }
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let body = self.body();
        (
            self.status,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

/// Unknown ids and duplicate ids are both client errors here.
impl From<StoreError> for HTTPError {
    fn from(e: StoreError) -> Self {
        HTTPError::new(StatusCode::BAD_REQUEST, e.to_string())
    }
}

/// Any body that fails to parse as the expected JSON is a 400.
impl From<JsonRejection> for HTTPError {
    fn from(rejection: JsonRejection) -> Self {
        HTTPError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}
