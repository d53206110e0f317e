//! Configuration for the verification service

use pn_shared::VerificationConfig;

use super::types::MessageEncoding;

/// Configuration for the verification service
#[derive(Debug, Clone, Default)]
pub struct VerificationServiceConfig {
    /// Send verification messages as flash SMS
    pub flash_sms: bool,
    /// Skip GSM-7 detection and always send UCS-2
    pub force_unicode: bool,
}

impl VerificationServiceConfig {
    /// Encoding to use for a rendered body
    pub fn encoding_for(&self, body: &str) -> MessageEncoding {
        if self.force_unicode {
            MessageEncoding::Ucs2
        } else {
            MessageEncoding::for_body(body)
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            flash_sms: config.flash_sms,
            force_unicode: config.force_unicode,
        }
    }
}
