use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::storage::entities::{companies, licenses};

// ==================== REQUEST DTOs ====================

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CompanyCreate {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct LicenseCreate {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Metadata for a document attached to a problem.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct FileUpload {
    /// Local path of the document; must be an existing pdf, doc or docx of
    /// at most 10 MiB.
    #[validate(custom(function = "crate::validators::validate_document_path"))]
    pub path: String,
    pub problem_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct MessageCreate {
    pub meeting_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub author: String,
    #[validate(length(min = 1, max = 4000))]
    pub body: String,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CommentCreate {
    pub problem_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub author: String,
    #[validate(length(min = 1, max = 4000))]
    pub body: String,
}

/// `choice` is -1 (against), 0 (abstain) or 1 (for).
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct VoteCreate {
    pub survey_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub voter: String,
    #[validate(range(min = -1, max = 1))]
    pub choice: i32,
}

/// Largest offset the database accepts (SQL integers are signed 64-bit).
pub const MAX_OFFSET: u64 = i64::MAX as u64;

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub limit: Option<u64>,
    #[validate(range(max = MAX_OFFSET))]
    pub offset: Option<u64>,
}

// ==================== RESPONSE DTOs ====================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<companies::Model> for CompanyResponse {
    fn from(model: companies::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LicenseResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<licenses::Model> for LicenseResponse {
    fn from(model: licenses::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            name: model.name,
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u32,
}
