// tests/integration/mod.rs

// ============================================
// Re-export commonly used types
// ============================================
pub use serde_json::{json, Value};
pub use std::sync::Arc;
pub use uuid::Uuid;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use problem_hub::{
    api::routes::{create_router, AppState},
    storage::{init_db, SeaOrmCompanyRepository},
};
use tower::ServiceExt;

// ============================================
// Public modules (test files)
// ============================================
pub mod api;
pub mod licenses;
pub mod repository;

// ============================================
// Shared Test Helpers
// ============================================

pub async fn create_test_repo() -> SeaOrmCompanyRepository {
    let db = init_db("sqlite::memory:").await.unwrap();
    SeaOrmCompanyRepository::new(db)
}

pub async fn create_test_app() -> Router {
    let state = AppState {
        repo: Arc::new(create_test_repo().await),
    };
    create_router(state)
}

/// Sends one request and returns the status plus the parsed JSON body
/// (`Value::Null` for empty bodies).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

pub async fn create_company(app: &Router, name: &str) -> Uuid {
    let payload = json!({ "name": name });
    let (status, body) = send(app, "POST", "/api/v1/companies", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().parse().unwrap()
}
