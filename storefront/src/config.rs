//! Storefront server configuration

/// Server configuration, loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (e.g. `sqlite://data/storefront.db`)
    pub database_url: String,
    /// HTTP port for the presentation API
    pub http_port: u16,
    /// Maximum connections in the SQLite pool
    pub db_max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables, with defaults that
    /// stand up an embedded store under `data/`
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/storefront.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),
        }
    }
}
