//! Message dispatch configuration

use serde::{Deserialize, Serialize};

/// SMS provider used to deliver verification messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Log and record messages instead of sending them
    #[default]
    Mock,
    /// Twilio REST API
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Unknown SMS provider: {}", s)),
        }
    }
}

/// Twilio credentials and transport settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TwilioSettings {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// Sender number (E.164)
    pub from_number: String,
    /// REST API base URL
    pub api_base: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for TwilioSettings {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            api_base: String::from("https://api.twilio.com/2010-04-01"),
            request_timeout_secs: 30,
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SmsConfig {
    /// Which provider delivers messages
    pub provider: SmsProvider,
    /// Twilio settings, used when `provider` is `twilio`
    pub twilio: TwilioSettings,
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("SMS_PROVIDER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let defaults = TwilioSettings::default();

        Self {
            provider,
            twilio: TwilioSettings {
                account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
                auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
                from_number: std::env::var("TWILIO_FROM_NUMBER").unwrap_or_default(),
                api_base: std::env::var("TWILIO_API_BASE").unwrap_or(defaults.api_base),
                request_timeout_secs: std::env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.request_timeout_secs),
            },
        }
    }
}
