//! Verification message policy

use serde::{Deserialize, Serialize};

/// How the outbound verification SMS is encoded and flagged
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Send verification messages as flash SMS
    pub flash_sms: bool,
    /// Always use UCS-2 instead of picking GSM-7 when the body allows it
    pub force_unicode: bool,
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let flag = |name: &str| {
            std::env::var(name)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
        };

        Self {
            flash_sms: flag("VERIFICATION_FLASH_SMS"),
            force_unicode: flag("VERIFICATION_FORCE_UNICODE"),
        }
    }
}
