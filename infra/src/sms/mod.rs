//! SMS Service Module
//!
//! Delivers verification messages to phones.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Logs and records messages for development
//! - **Twilio Support**: Production SMS via the Twilio REST API
//! - **Dispatch Adapter**: Plugs any provider into the verification service
//! - **Security**: Phone number masking in logs

use std::sync::Arc;

use pn_shared::{SmsConfig, SmsProvider};

use crate::InfrastructureError;

pub mod dispatch_adapter;
pub mod mock_sms;
pub mod sms_service;

#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use dispatch_adapter::SmsDispatchAdapter;
pub use mock_sms::{MockSmsService, RecordedSms};
pub use sms_service::{is_valid_e164, mask_phone_number, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::TwilioSmsService;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// A provider that cannot be initialized is an error. The mock is only used
/// when it is the configured provider.
pub fn create_sms_service(config: &SmsConfig) -> Result<Arc<dyn SmsService>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => Ok(Arc::new(MockSmsService::new())),
        #[cfg(feature = "twilio-sms")]
        SmsProvider::Twilio => match TwilioSmsService::new(config.twilio.clone()) {
            Ok(service) => Ok(Arc::new(service)),
            Err(e) => {
                tracing::error!("Failed to initialize Twilio SMS service: {}", e);
                Err(e)
            }
        },
        #[cfg(not(feature = "twilio-sms"))]
        SmsProvider::Twilio => Err(InfrastructureError::Config(
            "Twilio support is not compiled in (enable the twilio-sms feature)".to_string(),
        )),
    }
}

/// Dispatcher for the verification service built from configuration
pub fn create_dispatcher(config: &SmsConfig) -> Result<SmsDispatchAdapter, InfrastructureError> {
    create_sms_service(config).map(SmsDispatchAdapter::new)
}
