//! problem-hub - company, problem, meeting and survey backend

pub mod api;
pub mod config;
pub mod storage;
pub mod validators;

// Re-export main types for convenience
pub use crate::api::error::ApiError;
pub use crate::api::routes::{create_router, AppState};
pub use crate::config::Config;
pub use crate::storage::db::init_db;
pub use crate::storage::repository::{CompanyRepository, SeaOrmCompanyRepository};
