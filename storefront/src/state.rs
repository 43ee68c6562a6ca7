//! Application state
//!
//! One explicit store handle constructed at startup and injected into every
//! component that needs it. No ambient global connection.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::Config;
use crate::db;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl AppState {
    /// Open the store and bring the schema fully up to date.
    ///
    /// The schema manager runs to completion here, before the router is
    /// built, so no order workflow call ever observes a partially migrated
    /// store. A migration failure is fatal to startup.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        // A file-backed store needs its parent directory in place
        if let Some(path) = config.database_url.strip_prefix("sqlite://")
            && path != ":memory:"
            && let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let options =
            SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(options)
            .await?;

        db::schema::ensure_schema(&pool).await?;
        tracing::info!("Schema ready");

        Ok(Self { pool })
    }
}
