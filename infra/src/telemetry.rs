//! Tracing subscriber setup

use pn_shared::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::InfrastructureError;

/// Filter honouring `RUST_LOG`, falling back to the configured level
pub fn build_filter(level: &str) -> Result<EnvFilter, InfrastructureError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| InfrastructureError::Config(format!("Invalid log level '{}': {}", level, e)))
}

/// Install the global tracing subscriber
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = build_filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(filter);
    let source = config.source_location;

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_file(source)
                    .with_line_number(source),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(config.colored)
                    .with_file(source)
                    .with_line_number(source),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(config.colored)
                    .with_file(source)
                    .with_line_number(source),
            )
            .try_init(),
    };

    result.map_err(|e| InfrastructureError::Config(format!("Failed to install subscriber: {}", e)))?;

    tracing::debug!(
        event = "tracing_initialized",
        level = %config.level,
        format = ?config.format,
        "Tracing initialized"
    );
    Ok(())
}
