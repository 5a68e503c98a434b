//! Field-level validators used by the request schemas and handlers.

use std::borrow::Cow;
use std::path::Path;

use validator::ValidationError;

use crate::api::error::ApiError;
use crate::storage::repository::CompanyRepository;

/// Largest accepted document, 10 MiB.
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

pub const ALLOWED_DOCUMENT_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

pub const LICENSE_NAME_TAKEN: &str = "A license with this name already exists";

fn validation_error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// Checks extension, existence and size, in that order.
pub fn validate_document_path(path: &str) -> Result<(), ValidationError> {
    let file = Path::new(path);

    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let allowed = extension
        .as_deref()
        .is_some_and(|ext| ALLOWED_DOCUMENT_EXTENSIONS.contains(&ext));
    if !allowed {
        return Err(validation_error(
            "invalid_extension",
            format!(
                "Unsupported file type; expected one of: {}",
                ALLOWED_DOCUMENT_EXTENSIONS.join(", ")
            ),
        ));
    }

    let metadata = match std::fs::metadata(file) {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => {
            return Err(validation_error(
                "file_not_found",
                format!("File not found: {}", path),
            ))
        }
    };

    if metadata.len() > MAX_DOCUMENT_BYTES {
        return Err(validation_error(
            "file_too_large",
            format!("File exceeds {} bytes", MAX_DOCUMENT_BYTES),
        ));
    }

    Ok(())
}

/// Rejects `name` when any license already carries it.
///
/// This is a plain read; two concurrent requests with the same name can both
/// pass.
pub async fn validate_license_name(
    repo: &dyn CompanyRepository,
    name: &str,
) -> Result<(), ApiError> {
    if repo.find_license_by_name(name).await?.is_some() {
        tracing::warn!(name, "Rejected duplicate license name");
        return Err(ApiError::Conflict(LICENSE_NAME_TAKEN.to_string()));
    }
    Ok(())
}
