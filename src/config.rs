use serde::Deserialize;
use validator::Validate;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Main configuration for problem-hub
#[derive(Debug, Deserialize, Validate, Clone)]
pub struct Config {
    /// HTTP server port
    #[validate(range(min = 1024, max = 65535))]
    pub server_port: u16,

    /// Address the HTTP listener binds to
    pub bind_address: String,

    /// Database URL (SeaORM / SQLite)
    #[validate(length(min = 1))]
    pub database_url: String,

    /// Maximum database connections
    #[validate(range(min = 1, max = 100))]
    pub max_connections: u32,

    /// Log level (e.g., info, debug, trace)
    pub log_level: String,

    /// Apply pending schema revisions on start-up
    pub run_migrations: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::load_from(&format!("{}/.problem-hub/config", home))
    }

    /// Loads defaults, then `file` (any format `config` understands, optional),
    /// then `PROBLEM_HUB__*` environment overrides.
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .set_default("server_port", 8080)?
            .set_default("bind_address", "127.0.0.1")?
            .set_default("database_url", "sqlite://problem_hub.db")?
            .set_default("max_connections", 10)?
            .set_default("log_level", "info")?
            .set_default("run_migrations", true)?
            .add_source(config::File::with_name(file).required(false))
            // Environment overrides: PROBLEM_HUB__SERVER_PORT, PROBLEM_HUB__DATABASE_URL, etc.
            .add_source(
                config::Environment::with_prefix("PROBLEM_HUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// `bind_address:server_port`, ready for `TcpListener::bind`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.server_port)
    }
}
