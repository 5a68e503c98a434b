use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::ValidationErrors;

use crate::api::dto::ErrorResponse;
use crate::storage::repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            RepositoryError::Duplicate(_) => {
                ApiError::Conflict("An entry with this name already exists".to_string())
            }
            other => ApiError::Repository(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Repository(err) = &self {
            tracing::error!("Repository failure: {}", err);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: u32::from(status.as_u16()),
        };
        (status, Json(body)).into_response()
    }
}
