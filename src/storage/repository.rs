use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{prelude::*, QueryOrder, QuerySelect, Set, SqlErr};
use uuid::Uuid;

use crate::storage::entities::{companies, licenses};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

/// Input for [`CompanyRepository::create_license`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLicense {
    pub company_id: Uuid,
    pub name: String,
    pub expires_at: Option<DateTime<Utc>>,
}

// ============================================
// TRAIT DEFINITION - with Send + Sync bounds
// ============================================
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create_company(&self, name: &str) -> Result<companies::Model, RepositoryError>;
    async fn find_company(&self, id: Uuid) -> Result<Option<companies::Model>, RepositoryError>;
    async fn list_companies(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<companies::Model>, RepositoryError>;

    /// Fails with [`RepositoryError::NotFound`] when the company is missing.
    async fn create_license(&self, license: NewLicense)
        -> Result<licenses::Model, RepositoryError>;
    async fn find_license_by_name(
        &self,
        name: &str,
    ) -> Result<Option<licenses::Model>, RepositoryError>;
    async fn list_licenses(&self, company_id: Uuid)
        -> Result<Vec<licenses::Model>, RepositoryError>;
}

// ============================================
// IMPLEMENTATION STRUCT
// ============================================
pub struct SeaOrmCompanyRepository {
    db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn insert_error(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::Duplicate(detail),
        _ => RepositoryError::Db(err),
    }
}

// ============================================
// TRAIT IMPLEMENTATION
// ============================================
#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn create_company(&self, name: &str) -> Result<companies::Model, RepositoryError> {
        let company = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let model = company.insert(&self.db).await.map_err(insert_error)?;
        tracing::info!(company_id = %model.id, "Created company");
        Ok(model)
    }

    async fn find_company(&self, id: Uuid) -> Result<Option<companies::Model>, RepositoryError> {
        Ok(companies::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list_companies(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<companies::Model>, RepositoryError> {
        let models = companies::Entity::find()
            .order_by_asc(companies::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    async fn create_license(
        &self,
        license: NewLicense,
    ) -> Result<licenses::Model, RepositoryError> {
        if self.find_company(license.company_id).await?.is_none() {
            return Err(RepositoryError::NotFound(format!(
                "company {}",
                license.company_id
            )));
        }

        let active = licenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(license.company_id),
            name: Set(license.name),
            created_at: Set(Utc::now()),
            expires_at: Set(license.expires_at),
        };

        let model = active.insert(&self.db).await.map_err(insert_error)?;
        tracing::info!(license_id = %model.id, company_id = %model.company_id, "Created license");
        Ok(model)
    }

    async fn find_license_by_name(
        &self,
        name: &str,
    ) -> Result<Option<licenses::Model>, RepositoryError> {
        let model = licenses::Entity::find()
            .filter(licenses::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model)
    }

    async fn list_licenses(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<licenses::Model>, RepositoryError> {
        let models = licenses::Entity::find()
            .filter(licenses::Column::CompanyId.eq(company_id))
            .order_by_asc(licenses::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models)
    }
}
