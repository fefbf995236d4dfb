//! In-process test harness: the real router over the in-memory document
//! store, driven with `tower::ServiceExt::oneshot`. No live database or
//! network listener is involved.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use codex_api_rust::config::{ApiConfig, AppConfig, DatabaseConfig, Environment, SecurityConfig};
use codex_api_rust::database::MemoryDocumentStore;
use codex_api_rust::models::user::USERS_COLLECTION;
use codex_api_rust::routes;
use codex_api_rust::state::AppState;

pub const API_KEY: &str = "test-api-key";
pub const JWT_SECRET: &str = "test-jwt-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        environment: Environment::Development,
        port: 0,
        database: DatabaseConfig {
            url: String::new(),
            name: None,
            max_connections: 1,
            connect_timeout_secs: 1,
        },
        api: ApiConfig {
            rate_limit_requests: 5,
            rate_limit_window_secs: 60,
            request_timeout_secs: 10,
        },
        security: SecurityConfig {
            api_key: API_KEY.to_string(),
            jwt_secret: JWT_SECRET.to_string(),
            jwt_expiry_hours: 24,
        },
    }
}

/// Fresh application per test: independent store and rate limiter.
pub fn test_app() -> Router {
    let store = MemoryDocumentStore::new()
        .with_unique(USERS_COLLECTION, "username")
        .with_unique(USERS_COLLECTION, "email");
    routes::app(AppState::new(test_config(), Arc::new(store)))
}

/// Build a request carrying the connect-info extension the rate limiter
/// expects from a real listener.
pub fn build_request(
    method: Method,
    uri: &str,
    body: Option<&Value>,
    headers: &[(&str, &str)],
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));

    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Dispatch a request and collect status, decoded body, and headers.
/// Non-JSON bodies come back as a JSON string value.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value, HeaderMap) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, body, headers)
}

/// Shorthand for an API-keyed catalog request.
pub async fn api(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let request = build_request(method, uri, body, &[("X-API-Key", API_KEY)]);
    let (status, body, _) = send(app, request).await;
    (status, body)
}
