//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//! 1. `AppConfig::from_env()`, i.e. the environment preset plus the plain
//!    variables each section reads (`DATABASE_URL`, `REDIS_URL`, ...)
//! 2. An optional TOML file
//! 3. `PHONENUMBER__<SECTION>__<KEY>` variables, e.g.
//!    `PHONENUMBER__DATABASE__MAX_CONNECTIONS=20`

use ::config::{Config, Environment, File, FileFormat};
use pn_shared::{AppConfig, SmsProvider};

use crate::InfrastructureError;

/// Prefix of the layered environment overrides
pub const ENV_PREFIX: &str = "PHONENUMBER";

/// Load the application configuration
///
/// A `.env` file is read first if present. When `path` is given the file
/// must exist.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let defaults = AppConfig::from_env();
    let mut builder = Config::builder().add_source(Config::try_from(&defaults)?);

    if let Some(path) = path {
        tracing::debug!(event = "config_file", path = %path, "Loading configuration file");
        builder = builder.add_source(File::new(path, FileFormat::Toml).required(true));
    }

    let config: AppConfig = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    tracing::info!(
        event = "config_loaded",
        environment = %config.environment,
        sms_provider = ?config.sms.provider,
        "Configuration loaded"
    );
    if config.environment.is_production() && config.sms.provider == SmsProvider::Mock {
        tracing::warn!(
            event = "mock_sms_in_production",
            "Production configuration uses the mock SMS provider, no message will be delivered"
        );
    }

    Ok(config)
}
