use super::{create_company, create_test_app, json, send, Uuid};
use axum::http::StatusCode;
use problem_hub::validators::LICENSE_NAME_TAKEN;

// ============================================
// License Endpoint Tests
// ============================================

#[tokio::test]
async fn test_create_license() {
    let app = create_test_app().await;
    let company = create_company(&app, "Acme").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/companies/{company}/licenses"),
        Some(json!({ "name": "Enterprise", "expires_at": "2030-01-01T00:00:00Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Enterprise");
    assert_eq!(body["company_id"], company.to_string());
    assert!(body["expires_at"].as_str().unwrap().starts_with("2030-01-01"));
}

#[tokio::test]
async fn test_duplicate_license_name_is_rejected() {
    let app = create_test_app().await;
    let company = create_company(&app, "Acme").await;
    let uri = format!("/api/v1/companies/{company}/licenses");

    let (first, _) = send(&app, "POST", &uri, Some(json!({ "name": "Enterprise" }))).await;
    let (second, body) = send(&app, "POST", &uri, Some(json!({ "name": "Enterprise" }))).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], LICENSE_NAME_TAKEN);
}

#[tokio::test]
async fn test_license_names_are_unique_across_companies() {
    let app = create_test_app().await;
    let acme = create_company(&app, "Acme").await;
    let globex = create_company(&app, "Globex").await;

    send(
        &app,
        "POST",
        &format!("/api/v1/companies/{acme}/licenses"),
        Some(json!({ "name": "Enterprise" })),
    )
    .await;
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/companies/{globex}/licenses"),
        Some(json!({ "name": "Enterprise" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_license_for_unknown_company() {
    let app = create_test_app().await;
    let uri = format!("/api/v1/companies/{}/licenses", Uuid::new_v4());

    let (status, _) = send(&app, "POST", &uri, Some(json!({ "name": "Enterprise" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_license_payload() {
    let app = create_test_app().await;
    let company = create_company(&app, "Acme").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/companies/{company}/licenses"),
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_licenses_of_company() {
    let app = create_test_app().await;
    let company = create_company(&app, "Acme").await;
    let uri = format!("/api/v1/companies/{company}/licenses");
    for name in ["Starter", "Enterprise"] {
        send(&app, "POST", &uri, Some(json!({ "name": name }))).await;
    }

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}
