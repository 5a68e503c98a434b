pub mod db;
pub mod entities;
pub mod repository;

pub use db::{connect, init_db, run_migrations};
pub use entities::{companies, licenses};
pub use repository::{CompanyRepository, NewLicense, RepositoryError, SeaOrmCompanyRepository};
