use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{docs::ApiDoc, dto::*, error::ApiError},
    storage::repository::{CompanyRepository, NewLicense},
    validators::validate_license_name,
};

pub const DEFAULT_PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 200;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn CompanyRepository>,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service placeholder", body = String))
)]
pub async fn root() -> &'static str {
    "problem-hub"
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/companies",
    request_body = CompanyCreate,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse)
    )
)]
pub async fn create_company(
    State(state): State<AppState>,
    Json(req): Json<CompanyCreate>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    req.validate()?;
    let company = state.repo.create_company(&req.name).await?;
    Ok((StatusCode::CREATED, Json(company.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies",
    params(ListQuery),
    responses(
        (status = 200, description = "Companies ordered by name", body = [CompanyResponse]),
        (status = 422, description = "Offset out of range", body = ErrorResponse)
    )
)]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<CompanyResponse>>, ApiError> {
    params.validate()?;
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);

    let companies = state.repo.list_companies(limit, offset).await?;
    Ok(Json(companies.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company", body = CompanyResponse),
        (status = 404, description = "Unknown company", body = ErrorResponse)
    )
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyResponse>, ApiError> {
    match state.repo.find_company(id).await? {
        Some(company) => Ok(Json(company.into())),
        None => Err(ApiError::NotFound("Company not found".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/companies/{id}/licenses",
    params(("id" = Uuid, Path, description = "Company id")),
    request_body = LicenseCreate,
    responses(
        (status = 201, description = "License created", body = LicenseResponse),
        (status = 400, description = "A license with this name already exists", body = ErrorResponse),
        (status = 404, description = "Unknown company", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse)
    )
)]
pub async fn create_license(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(req): Json<LicenseCreate>,
) -> Result<(StatusCode, Json<LicenseResponse>), ApiError> {
    req.validate()?;
    if state.repo.find_company(company_id).await?.is_none() {
        return Err(ApiError::NotFound("Company not found".to_string()));
    }
    validate_license_name(state.repo.as_ref(), &req.name).await?;

    let license = state
        .repo
        .create_license(NewLicense {
            company_id,
            name: req.name,
            expires_at: req.expires_at,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(license.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}/licenses",
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Licenses of the company", body = [LicenseResponse]),
        (status = 404, description = "Unknown company", body = ErrorResponse)
    )
)]
pub async fn list_licenses(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<LicenseResponse>>, ApiError> {
    if state.repo.find_company(company_id).await?.is_none() {
        return Err(ApiError::NotFound("Company not found".to_string()));
    }
    let licenses = state.repo.list_licenses(company_id).await?;
    Ok(Json(licenses.into_iter().map(Into::into).collect()))
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/v1/companies", post(create_company).get(list_companies))
        .route("/api/v1/companies/{id}", get(get_company))
        .route(
            "/api/v1/companies/{id}/licenses",
            post(create_license).get(list_licenses),
        )
        .route("/api-docs/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
