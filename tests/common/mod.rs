//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate; helpers used by only one test
//! file would otherwise generate dead code warnings in the others.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{Duration, SecondsFormat, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use task_tracker_api::api::{AppState, app_router};

// =============================================================================
// App Creation Helpers
// =============================================================================

/// Creates a router backed by a fresh in-memory repository.
pub fn create_test_app() -> Router {
    app_router(AppState::in_memory())
}

/// Returns an RFC 3339 timestamp `hours` from now.
pub fn due_in_hours(hours: i64) -> String {
    (Utc::now() + Duration::hours(hours)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends a request with an optional JSON body and returns status and parsed body.
///
/// Empty response bodies are returned as `Value::Null`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    send_request(app, request).await
}

/// Sends a raw request and returns status and parsed body.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect body")
        .to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };
    (status, body)
}

/// Creates a task through the API and returns its JSON representation.
pub async fn create_task(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, Method::POST, "/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    created
}

/// Returns the `id` field of a task JSON object.
pub fn id_of(task: &Value) -> String {
    task["id"]
        .as_str()
        .expect("Task JSON has no string id")
        .to_string()
}
