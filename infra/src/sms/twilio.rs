//! Twilio SMS service
//!
//! Posts messages to the Twilio REST API (`Accounts/{sid}/Messages.json`)
//! with basic auth. Rate limiting and server errors are retried with
//! exponential backoff; client errors are not.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use pn_core::services::verification::{MessageEncoding, OutboundSms};
use pn_shared::TwilioSettings;

use super::sms_service::{is_valid_e164, mask_phone_number, SmsService};
use crate::InfrastructureError;

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

/// Error body returned by the Twilio API
#[derive(Debug, Deserialize)]
pub(crate) struct TwilioErrorBody {
    pub code: Option<i64>,
    pub message: String,
}

enum SendFailure {
    Retryable(String),
    Fatal(String),
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: reqwest::Client,
    settings: TwilioSettings,
}

impl TwilioSmsService {
    /// Create the service, validating the credentials are present
    pub fn new(settings: TwilioSettings) -> Result<Self, InfrastructureError> {
        if settings.account_sid.is_empty() || settings.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio account SID and auth token are required".to_string(),
            ));
        }
        if !is_valid_e164(&settings.from_number) {
            return Err(InfrastructureError::Config(
                "Twilio from number must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        info!(
            event = "twilio_init",
            from = %mask_phone_number(&settings.from_number),
            "Twilio SMS service initialized"
        );

        Ok(Self { client, settings })
    }

    pub(crate) fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.account_sid
        )
    }

    /// Form fields of the create-message request
    pub(crate) fn build_form(&self, to: &str, message: &OutboundSms) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("To", to.to_string()),
            ("From", self.settings.from_number.clone()),
            ("Body", message.body.clone()),
        ];
        if message.encoding == MessageEncoding::Gsm7 {
            form.push(("SmartEncoded", "true".to_string()));
        }
        form
    }

    async fn send_once(&self, form: &[(&'static str, String)]) -> Result<String, SendFailure> {
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.settings.account_sid, Some(&self.settings.auth_token))
            .form(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    SendFailure::Retryable(e.to_string())
                } else {
                    SendFailure::Fatal(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SendFailure::Retryable(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_str::<MessageResource>(&body)
                .map(|m| m.sid)
                .map_err(|e| SendFailure::Fatal(format!("Unexpected Twilio response: {}", e)));
        }

        let detail = describe_error(status.as_u16(), &body);
        if status.as_u16() == 429 || status.is_server_error() {
            Err(SendFailure::Retryable(detail))
        } else {
            Err(SendFailure::Fatal(detail))
        }
    }
}

/// Human readable form of a Twilio error response
pub(crate) fn describe_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<TwilioErrorBody>(body) {
        Ok(TwilioErrorBody {
            code: Some(code),
            message,
        }) => format!("Twilio error {} (HTTP {}): {}", code, status, message),
        Ok(TwilioErrorBody { code: None, message }) => {
            format!("Twilio error (HTTP {}): {}", status, message)
        }
        Err(_) => format!("Twilio error (HTTP {})", status),
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, to: &str, message: &OutboundSms) -> Result<String, InfrastructureError> {
        if !is_valid_e164(to) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                mask_phone_number(to)
            )));
        }
        if message.flash {
            debug!(
                event = "twilio_flash_unsupported",
                "Twilio has no flash message class, sending a normal SMS"
            );
        }

        let form = self.build_form(to, message);
        let mut delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS);
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.send_once(&form).await {
                Ok(sid) => {
                    info!(
                        event = "sms_sent",
                        provider = "twilio",
                        phone = %mask_phone_number(to),
                        message_id = %sid,
                        "SMS sent"
                    );
                    return Ok(sid);
                }
                Err(SendFailure::Retryable(reason)) if attempts < MAX_ATTEMPTS => {
                    warn!(
                        "Failed to send SMS (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, MAX_ATTEMPTS, reason, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(SendFailure::Retryable(reason)) | Err(SendFailure::Fatal(reason)) => {
                    error!(
                        event = "sms_failed",
                        provider = "twilio",
                        phone = %mask_phone_number(to),
                        attempts = attempts,
                        "Failed to send SMS: {}",
                        reason
                    );
                    return Err(InfrastructureError::Sms(reason));
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
