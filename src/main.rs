use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use problem_hub::{
    api::routes,
    config::Config,
    storage::{self, repository::SeaOrmCompanyRepository},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load config
    let config = Config::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("problem_hub={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database
    let db = storage::connect(&config.database_url, config.max_connections).await?;
    if config.run_migrations {
        storage::run_migrations(&db).await?;
    } else {
        tracing::warn!("Skipping schema migrations (run_migrations = false)");
    }

    let state = routes::AppState {
        repo: Arc::new(SeaOrmCompanyRepository::new(db)),
    };
    let app = routes::create_router(state);

    // Start server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 Server listening on {}", addr);
    tracing::info!("📖 OpenAPI document: GET /api-docs/openapi.json");

    axum::serve(listener, app).await?;

    Ok(())
}
