//! Unit tests for SMS module

#[cfg(feature = "twilio-sms")]
mod twilio_tests;

use pn_core::domain::entities::CallablePhoneNumber;
use pn_core::services::verification::{MessageEncoding, OutboundSms};

/// HU 00/06/36/30/1234567
pub(super) fn hungarian_number(extension: Option<&str>) -> CallablePhoneNumber {
    CallablePhoneNumber {
        idd_prefix: "00".to_string(),
        ndd_prefix: "06".to_string(),
        country_call_code: "36".to_string(),
        area_call_number: "30".to_string(),
        subscriber_number: "1234567".to_string(),
        extension: extension.map(str::to_string),
    }
}

pub(super) fn plain_message(body: &str) -> OutboundSms {
    OutboundSms {
        body: body.to_string(),
        encoding: MessageEncoding::for_body(body),
        flash: false,
    }
}
