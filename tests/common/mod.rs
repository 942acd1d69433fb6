#![allow(dead_code)]

//! Shared helpers for integration tests.
//!
//! Each test gets its own application over a fresh in-memory SQLite
//! database, exercised through the real router via `tower::oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use blog_api::infra::Database;
use blog_api::{api::create_router, AppState, Config};

/// Build an application backed by a fresh in-memory database.
pub async fn test_app() -> Router {
    let config = Config::for_tests("sqlite::memory:");
    let db = Arc::new(Database::connect(&config).await);
    let state = AppState::from_config(db, config);
    create_router(state)
}

/// Send a JSON request and return (status, parsed body).
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router never fails");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Register a user and return their access token.
pub async fn register_user(app: &Router, name: &str, email: &str, password: &str) -> String {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
            "password_confirmation": password,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
    body["access_token"]
        .as_str()
        .expect("token payload")
        .to_string()
}

/// Fetch the authenticated user's id via /auth/me.
pub async fn user_id(app: &Router, token: &str) -> String {
    let (status, body) = send_json(app, Method::GET, "/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().expect("user id").to_string()
}

/// Create a post and return its JSON representation.
pub async fn create_post(app: &Router, token: &str, title: &str, content: &str) -> Value {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/posts",
        Some(token),
        Some(serde_json::json!({ "title": title, "content": content })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "post creation failed: {}", body);
    body
}
