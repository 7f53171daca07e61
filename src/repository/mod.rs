//! Repository layer for database operations

pub mod clients;
pub mod services;
pub mod tenants;
pub mod visits;

use std::{path::Path, str::FromStr, time::Duration};

use rust_decimal::Decimal;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{
    config::DatabaseConfig,
    error::{AppResult, StoreError},
};

/// How long a writer waits for the database write lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub clients: clients::ClientsRepository,
    pub services: services::ServicesRepository,
    pub visits: visits::VisitsRepository,
    pub tenants: tenants::TenantsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            clients: clients::ClientsRepository::new(pool.clone()),
            services: services::ServicesRepository::new(pool.clone()),
            visits: visits::VisitsRepository::new(pool.clone()),
            tenants: tenants::TenantsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open (creating if missing) and migrate the database at `config.url`
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        Self::connect_with(options, config.max_connections, config.min_connections).await
    }

    /// Open (creating if missing) and migrate a database file
    pub async fn connect_file(path: &Path, max_connections: u32) -> AppResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect_with(options, max_connections, 0).await
    }

    async fn connect_with(
        options: SqliteConnectOptions,
        max_connections: u32,
        min_connections: u32,
    ) -> AppResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(
                options
                    .foreign_keys(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(BUSY_TIMEOUT),
            )
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::new(pool))
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Monetary columns are stored as decimal text
pub(crate) fn decode_decimal(raw: &str) -> AppResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|_| StoreError::Decode(format!("invalid decimal '{}'", raw)).into())
}

#[cfg(test)]
pub(crate) async fn test_repository() -> Repository {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    Repository::connect(&config).await.unwrap()
}
