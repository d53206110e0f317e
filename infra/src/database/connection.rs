//! Database connection pool management
//!
//! Wraps the SQLx MySQL pool built from `DatabaseConfig` and runs the
//! bundled migrations on request.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use pn_shared::DatabaseConfig;

use crate::InfrastructureError;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect a new pool, running the migrations when
    /// `config.run_migrations` is set
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            event = "db_pool_create",
            max_connections = config.max_connections,
            "Creating database connection pool"
        );

        let mut connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        connect_options = if config.enable_logging {
            connect_options.log_statements(LevelFilter::Debug).log_slow_statements(
                LevelFilter::Warn,
                Duration::from_millis(config.slow_query_threshold),
            )
        } else {
            connect_options.disable_statement_logging()
        };

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(event = "db_pool_failed", error = %e, "Failed to create database pool");
                InfrastructureError::Database(e)
            })?;

        let pool = Self::from_pool(pool);
        if config.run_migrations {
            pool.run_migrations().await?;
        }

        tracing::info!(event = "db_pool_ready", "Database connection pool created");
        Ok(pool)
    }

    /// Wrap an already connected pool
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Underlying SQLx pool, for building repositories
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Apply the schema migrations under `infra/migrations`
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        tracing::info!(event = "db_migrate", "Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!(event = "db_migrate_done", "Database migrations completed");
        Ok(())
    }

    /// Check connectivity with a trivial query
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let value: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(value == 1)
    }

    pub fn get_statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        tracing::info!(event = "db_pool_close", "Closing database connection pool");
        self.pool.close().await;
    }
}

/// Connection pool statistics
#[derive(Debug, Clone)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pool Stats: {}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}
