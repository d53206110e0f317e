//! # Infrastructure Layer
//!
//! Concrete adapters behind the `pn_core` traits:
//! - **Database**: MySQL repositories for countries, areas, phone numbers
//!   and verification links, using SQLx
//! - **Cache**: Redis-backed verification token service
//! - **SMS**: message dispatch through Twilio or a logging mock
//!
//! Plus the process-level wiring: configuration loading and tracing setup.
//!
//! ## Features
//!
//! - `mysql`: MySQL repositories and migrations (default)
//! - `redis-cache`: Redis token service (default)
//! - `twilio-sms`: Twilio SMS sender (default)
//!
//! The mock SMS sender, configuration loading and telemetry are always
//! available.

use pn_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and token service
#[cfg(feature = "redis-cache")]
pub mod cache;

/// SMS dispatch module
pub mod sms;

/// Layered configuration loading
pub mod config;

/// Tracing subscriber setup
pub mod telemetry;

pub use config::load_config;
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[cfg(feature = "mysql")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[cfg(feature = "twilio-sms")]
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Stored data that cannot be mapped back into the domain
    #[error("Data error: {0}")]
    Data(String),
}

impl From<::config::ConfigError> for InfrastructureError {
    fn from(err: ::config::ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            #[cfg(feature = "mysql")]
            InfrastructureError::Database(e) => DomainError::Database {
                message: e.to_string(),
            },
            #[cfg(feature = "mysql")]
            InfrastructureError::Migration(e) => DomainError::Database {
                message: e.to_string(),
            },
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
