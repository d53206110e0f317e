//! Bridges an `SmsService` provider to the core `SmsDispatchTrait`

use async_trait::async_trait;
use std::sync::Arc;

use pn_core::domain::entities::CallablePhoneNumber;
use pn_core::services::verification::{OutboundSms, SmsDispatchTrait};

use super::sms_service::{is_valid_e164, mask_phone_number, SmsService};

/// Dispatches verification messages through an SMS provider
///
/// The destination is dialed in E.164 form built from the country call code,
/// area call number and subscriber number. Extensions cannot be dialed by SMS
/// and are only logged.
#[derive(Clone)]
pub struct SmsDispatchAdapter {
    inner: Arc<dyn SmsService>,
}

impl SmsDispatchAdapter {
    pub fn new(inner: Arc<dyn SmsService>) -> Self {
        Self { inner }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsDispatchTrait for SmsDispatchAdapter {
    async fn send(
        &self,
        destination: &CallablePhoneNumber,
        message: &OutboundSms,
    ) -> Result<String, String> {
        let to = destination.international_destination();
        if !is_valid_e164(&to) {
            return Err(format!(
                "Destination is not a valid E.164 number: {}",
                mask_phone_number(&to)
            ));
        }

        tracing::debug!(
            event = "sms_dispatch",
            provider = self.inner.provider_name(),
            phone = %mask_phone_number(&to),
            has_extension = destination.extension.is_some(),
            "Dispatching verification message"
        );

        self.inner
            .send_sms(&to, message)
            .await
            .map_err(|e| e.to_string())
    }
}
