use super::{create_company, create_test_app, json, send, Uuid};
use axum::http::StatusCode;

// ============================================
// REST API Tests
// ============================================

#[tokio::test]
async fn test_root_placeholder() {
    let app = create_test_app().await;
    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "problem-hub");
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_api_create_and_get_company() {
    let app = create_test_app().await;
    let id = create_company(&app, "Acme").await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/companies/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme");
    assert!(body["updated_at"].is_null());
}

#[tokio::test]
async fn test_api_get_unknown_company() {
    let app = create_test_app().await;
    let uri = format!("/api/v1/companies/{}", Uuid::new_v4());
    let (status, body) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_api_company_name_is_validated() {
    let app = create_test_app().await;
    let (status, body) = send(&app, "POST", "/api/v1/companies", Some(json!({ "name": "" }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 422);
}

#[tokio::test]
async fn test_api_duplicate_company_is_conflict() {
    let app = create_test_app().await;
    create_company(&app, "Acme").await;

    let (status, _) = send(&app, "POST", "/api/v1/companies", Some(json!({ "name": "Acme" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_list_companies_paginates_by_name() {
    let app = create_test_app().await;
    for name in ["Umbrella", "Acme", "Globex"] {
        create_company(&app, name).await;
    }

    let (status, body) = send(&app, "GET", "/api/v1/companies", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Acme", "Globex", "Umbrella"]);

    let (_, page) = send(&app, "GET", "/api/v1/companies?limit=1&offset=1", None).await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["name"], "Globex");
}

#[tokio::test]
async fn test_api_list_companies_rejects_oversized_offset() {
    let app = create_test_app().await;
    create_company(&app, "Acme").await;

    let uri = format!("/api/v1/companies?offset={}", u64::MAX);
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 422);

    let uri = format!("/api/v1/companies?offset={}", i64::MAX);
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_has_no_file_check_route() {
    let app = create_test_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/files/validate",
        Some(json!({ "path": "/etc/hostname.pdf" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_openapi_document() {
    let app = create_test_app().await;
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/companies/{id}/licenses"].is_object());
}
