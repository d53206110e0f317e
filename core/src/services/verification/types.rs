//! Types exchanged with the token service and the message dispatcher

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::VerificationState;

/// Template variable holding the accept token
pub const ACCEPT_TOKEN_VARIABLE: &str = "acceptToken";

/// Template variable holding the reject token
pub const REJECT_TOKEN_VARIABLE: &str = "rejectToken";

/// End of a verification that lasts `verification_length` seconds from `start`
///
/// `None` when the instant is not representable.
pub fn verification_expiry(start: DateTime<Utc>, verification_length: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(verification_length).and_then(|length| start.checked_add_signed(length))
}

/// Token pair minted for one verification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedTokens {
    pub verifiable_data_id: i64,
    pub verification_request_id: i64,
    pub accept_token: String,
    pub reject_token: String,
}

/// What the token service reports for a redeemed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenOutcome {
    /// The accept token was redeemed in time
    Verified,
    /// The reject token was redeemed in time
    Rejected,
    /// Anything else, e.g. redeemed after the deadline
    Other,
}

/// Result of a successful redeem call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemedToken {
    pub verifiable_data_id: i64,
    pub outcome: TokenOutcome,
    /// End of the verification validity, set for verified tokens
    pub verified_until: Option<DateTime<Utc>>,
}

/// Verification request as known by the token service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVerificationRequest {
    pub verifiable_data_id: i64,
    pub deadline: DateTime<Utc>,
}

/// Character encoding of an outbound SMS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageEncoding {
    /// GSM 03.38 default alphabet
    Gsm7,
    /// UCS-2, for bodies outside the default alphabet
    Ucs2,
}

// GSM 03.38 basic character set (escape excluded)
const GSM7_BASIC_CHARSET: &str = "@£$¥èéùìòÇ\nØø\rÅåΔ_ΦΓΛΩΠΨΣΘΞÆæßÉ !\"#¤%&'()*+,-./0123456789:;<=>?\
¡ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÑÜ§¿abcdefghijklmnopqrstuvwxyzäöñüà";

impl MessageEncoding {
    /// GSM-7 when every character is in the basic set, UCS-2 otherwise
    pub fn for_body(body: &str) -> Self {
        if body.chars().all(|c| GSM7_BASIC_CHARSET.contains(c)) {
            MessageEncoding::Gsm7
        } else {
            MessageEncoding::Ucs2
        }
    }
}

/// Message handed to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundSms {
    pub body: String,
    pub encoding: MessageEncoding,
    pub flash: bool,
}

/// Returned to the caller once a verification request has been dispatched
///
/// The tokens are deliberately absent: they only travel inside the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReceipt {
    pub verifiable_phone_id: i64,
    pub phone_verification_request_id: i64,
    pub verifiable_data_id: i64,
    pub verification_request_id: i64,
    pub message_id: String,
    pub state: VerificationState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gsm7_for_plain_text() {
        let body = "a1b2c3d4-0000-4000-8000-000000000000\nf0e1d2c3-0000-4000-8000-000000000000";
        assert_eq!(MessageEncoding::for_body(body), MessageEncoding::Gsm7);
        assert_eq!(MessageEncoding::for_body("Kód: 1234 @ £5"), MessageEncoding::Ucs2);
        assert_eq!(MessageEncoding::for_body("Code: 1234 @ £5, Straße"), MessageEncoding::Gsm7);
    }

    #[test]
    fn test_ucs2_outside_basic_set() {
        assert_eq!(MessageEncoding::for_body("Kőszeg"), MessageEncoding::Ucs2);
        assert_eq!(MessageEncoding::for_body("验证码"), MessageEncoding::Ucs2);
        // Extension table characters need an escape, so they are not basic
        assert_eq!(MessageEncoding::for_body("price: 5€"), MessageEncoding::Ucs2);
        assert_eq!(MessageEncoding::for_body("{token}"), MessageEncoding::Ucs2);
    }

    #[test]
    fn test_empty_body_is_gsm7() {
        assert_eq!(MessageEncoding::for_body(""), MessageEncoding::Gsm7);
    }
}
