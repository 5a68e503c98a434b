use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Opens the database, creating the SQLite file and its directory when needed.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    tracing::info!("Connecting to database: {}", database_url);

    let mut options = ConnectOptions::new(database_url);
    if database_url == "sqlite::memory:" {
        // Every pooled connection would open its own empty in-memory database.
        options.max_connections(1);
    } else if let Some(path_str) = database_url.strip_prefix("sqlite://") {
        let path_str = path_str.split('?').next().unwrap_or(path_str);
        let path = std::path::Path::new(path_str);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DbErr::Custom(format!("Failed to create DB directory: {}", e)))?;
                tracing::info!("Created database directory: {}", parent.display());
            }
        }

        if !path.exists() {
            std::fs::File::create(path)
                .map_err(|e| DbErr::Custom(format!("Failed to create DB file: {}", e)))?;
            tracing::info!("Created database file: {}", path.display());
        }
        options.max_connections(max_connections);
    } else {
        return Err(DbErr::Custom("Invalid SQLite URL format".to_string()));
    }
    options.sqlx_logging(false);

    Database::connect(options)
        .await
        .map_err(|e| DbErr::Custom(format!("Connection failed: {}", e)))
}

/// Brings the schema up to the head revision.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if pending.is_empty() {
        tracing::info!("Migrations already applied, skipping");
        return Ok(());
    }

    tracing::info!("Applying {} pending migration(s)", pending.len());
    Migrator::up(db, None).await
}

/// Connects with default pool settings and applies all revisions.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = connect(database_url, 10).await?;
    run_migrations(&db).await?;
    Ok(db)
}
