//! Shared utilities and common types for the phone number service
//!
//! This crate provides functionality used across the workspace:
//! - Configuration types
//! - Pagination window for list lookups
//! - Phone number helpers (masking, dialable form checks)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, SmsConfig,
    SmsProvider, TwilioSettings, VerificationConfig,
};
pub use types::PageWindow;
pub use utils::phone;
