//! PostgreSQL connection pool management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use campus_common::{AppConfig, AppError, AppResult, DatabaseConfig};

/// Pool tuning on top of the loaded database config
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// PostgreSQL connection URL
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
    /// Maximum idle time before a connection is closed
    pub idle_timeout: Duration,
}

impl PoolSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
        }
    }

    #[must_use]
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Host and database part of the URL, without credentials
    fn redacted_url(&self) -> &str {
        self.url
            .rsplit_once('@')
            .map_or(self.url.as_str(), |(_, host)| host)
    }
}

impl From<&DatabaseConfig> for PoolSettings {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            min_connections: config.min_connections.min(config.max_connections),
            ..Self::new(config.url.clone())
        }
    }
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool(settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .connect(&settings.url)
        .await?;

    info!(
        host = settings.redacted_url(),
        max_connections = settings.max_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Load [`AppConfig`] from the environment and connect
pub async fn create_pool_from_env() -> AppResult<PgPool> {
    let config = AppConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;
    create_pool(&PoolSettings::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}
