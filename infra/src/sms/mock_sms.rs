//! Mock SMS service
//!
//! Logs and records messages instead of sending them. Used for development
//! and by tests that need to read the delivered tokens back.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use pn_core::services::verification::OutboundSms;

use super::sms_service::{is_valid_e164, mask_phone_number, SmsService};
use crate::InfrastructureError;

/// A message accepted by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSms {
    pub message_id: String,
    pub to: String,
    pub message: OutboundSms,
}

/// Mock SMS service for development and testing
#[derive(Clone, Default)]
pub struct MockSmsService {
    sent: Arc<Mutex<Vec<RecordedSms>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send fail
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Number of messages accepted so far
    pub fn message_count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or(0)
    }

    /// Copy of every accepted message, oldest first
    pub fn sent_messages(&self) -> Vec<RecordedSms> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn last_message(&self) -> Option<RecordedSms> {
        self.sent.lock().ok().and_then(|sent| sent.last().cloned())
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, to: &str, message: &OutboundSms) -> Result<String, InfrastructureError> {
        if !is_valid_e164(to) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                mask_phone_number(to)
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                event = "sms_simulated_failure",
                phone = %mask_phone_number(to),
                "Mock SMS service simulating failure"
            );
            return Err(InfrastructureError::Sms("Simulated SMS sending failure".to_string()));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        self.sent
            .lock()
            .map_err(|_| InfrastructureError::Sms("Mock outbox poisoned".to_string()))?
            .push(RecordedSms {
                message_id: message_id.clone(),
                to: to.to_string(),
                message: message.clone(),
            });

        info!(
            target: "sms_service",
            event = "sms_sent",
            provider = "mock",
            phone = %mask_phone_number(to),
            message_id = %message_id,
            encoding = ?message.encoding,
            flash = message.flash,
            message_length = message.body.chars().count(),
            "SMS sent (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
