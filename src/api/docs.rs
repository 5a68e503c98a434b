use utoipa::OpenApi;

use crate::api::{dto, routes};

#[derive(OpenApi)]
#[openapi(
    info(title = "problem-hub", description = "Companies and their licenses"),
    paths(
        routes::root,
        routes::health,
        routes::create_company,
        routes::list_companies,
        routes::get_company,
        routes::create_license,
        routes::list_licenses,
    ),
    components(schemas(
        dto::CompanyCreate,
        dto::LicenseCreate,
        dto::FileUpload,
        dto::MessageCreate,
        dto::CommentCreate,
        dto::VoteCreate,
        dto::CompanyResponse,
        dto::LicenseResponse,
        dto::HealthResponse,
        dto::ErrorResponse,
    ))
)]
pub struct ApiDoc;
