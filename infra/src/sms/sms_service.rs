//! SMS service interface
//!
//! Providers deliver an already rendered message to an E.164 destination.

use async_trait::async_trait;
use pn_core::services::verification::OutboundSms;

use crate::InfrastructureError;

pub use pn_shared::phone::{is_valid_e164, mask_phone_number};

/// SMS provider interface
///
/// Implementations include the Twilio REST API and a recording mock for
/// development.
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send a message to an E.164 number
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier of the accepted message
    /// * `Err(InfrastructureError)` - If the provider refused or could not be reached
    async fn send_sms(&self, to: &str, message: &OutboundSms) -> Result<String, InfrastructureError>;

    /// Name of the provider, for logs
    fn provider_name(&self) -> &str;

    /// Whether the provider is expected to accept messages
    async fn is_available(&self) -> bool {
        true
    }
}
