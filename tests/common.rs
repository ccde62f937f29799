#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use quitsmoke::config::{from_yaml_str, ConfigV1};
use quitsmoke::routes::create_router;
use quitsmoke::startup::build_state;
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
jwt:
  secret: "integration-secret"
  exp: 300
  refresh_window: 30
logging:
  level: "debug"
  format: "json"
static_dir: "./static"
access:
  role_permissions:
    admin: ["smokers:list"]
  user_roles:
    arthur: ["admin"]
    victor: ["member"]
  path_permissions:
    /smokers: ["smokers:list"]
smokers:
  - id: arthur
    name: Arthur
    password: arthur-pass
    experience: 6
    StoppedSmoking: "2025-02-24T00:00:00Z"
  - id: victor
    name: Victor
    password: victor-pass
    experience: 10
    StoppedSmoking: "2024-01-15T00:00:00Z"
"#;

#[derive(Debug, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: i64,
}

pub fn test_config() -> ConfigV1 {
    from_yaml_str(TEST_CONFIG).expect("test config should parse")
}

pub async fn build_app() -> Router {
    let state = build_state(Arc::new(test_config())).await;
    create_router(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should complete");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("body should be UTF-8"),
    }
}

pub fn request(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn request_with_bearer(method: Method, path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn json_request(method: Method, path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

/// Signs in and returns the bearer token from the response header.
pub async fn sign_in(app: &Router, username: &str, password: &str) -> String {
    let response = send(
        app,
        json_request(
            Method::POST,
            "/signin",
            None,
            serde_json::json!({ "username": username, "password": password }),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK, "sign-in failed: {}", response.body);

    response
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .expect("sign-in should return a bearer token")
        .to_string()
}

pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
}
