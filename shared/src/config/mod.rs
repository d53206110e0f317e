//! Configuration module with one sub-module per concern
//!
//! - `cache` - Redis connection used by the token store
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `sms` - Message dispatch provider selection and credentials
//! - `verification` - Outbound verification message policy

pub mod cache;
pub mod database;
pub mod environment;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use sms::{SmsConfig, SmsProvider, TwilioSettings};
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Token store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Message dispatch configuration
    #[serde(default)]
    pub sms: SmsConfig,

    /// Verification message policy
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            sms: SmsConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/phonenumber_dev"),
            cache: CacheConfig::default(),
            sms: SmsConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::new("mysql://prod-db:3306/phonenumber")
                .with_max_connections(50),
            cache: CacheConfig::new("redis://prod-cache:6379"),
            sms: SmsConfig {
                provider: SmsProvider::Twilio,
                ..Default::default()
            },
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Starts from the environment preset, then lets each section read its
    /// own variables.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Production => Self::production(),
            Environment::Development | Environment::Staging => Self::development(),
        };
        config.environment = env;
        config.database = DatabaseConfig::from_env();
        config.cache = CacheConfig::from_env();
        config.sms = SmsConfig::from_env();
        config.verification = VerificationConfig::from_env();
        config.logging = LoggingConfig::for_environment(env).with_env_overrides();
        config
    }
}
