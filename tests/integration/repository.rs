use super::{create_test_repo, Uuid};
use problem_hub::storage::{CompanyRepository, NewLicense, RepositoryError};
use problem_hub::validators::validate_license_name;
use problem_hub::ApiError;

// ============================================
// Storage Layer Tests
// ============================================

#[tokio::test]
async fn test_repository_company_round_trip() {
    let repo = create_test_repo().await;

    let created = repo.create_company("Acme").await.unwrap();
    let found = repo.find_company(created.id).await.unwrap();

    assert_eq!(found, Some(created));
    assert_eq!(repo.find_company(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn test_repository_duplicate_company() {
    let repo = create_test_repo().await;
    repo.create_company("Acme").await.unwrap();

    let err = repo.create_company("Acme").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Duplicate(_)), "{err:?}");
}

#[tokio::test]
async fn test_repository_license_requires_company() {
    let repo = create_test_repo().await;

    let err = repo
        .create_license(NewLicense {
            company_id: Uuid::new_v4(),
            name: "Enterprise".to_string(),
            expires_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[tokio::test]
async fn test_repository_find_license_by_name() {
    let repo = create_test_repo().await;
    let company = repo.create_company("Acme").await.unwrap();

    let license = repo
        .create_license(NewLicense {
            company_id: company.id,
            name: "Enterprise".to_string(),
            expires_at: None,
        })
        .await
        .unwrap();

    assert_eq!(
        repo.find_license_by_name("Enterprise").await.unwrap(),
        Some(license)
    );
    assert_eq!(repo.find_license_by_name("Starter").await.unwrap(), None);
    assert_eq!(repo.list_licenses(company.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_validate_license_name_against_store() {
    let repo = create_test_repo().await;
    let company = repo.create_company("Acme").await.unwrap();

    assert!(validate_license_name(&repo, "Enterprise").await.is_ok());

    repo.create_license(NewLicense {
        company_id: company.id,
        name: "Enterprise".to_string(),
        expires_at: None,
    })
    .await
    .unwrap();

    let err = validate_license_name(&repo, "Enterprise").await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}
