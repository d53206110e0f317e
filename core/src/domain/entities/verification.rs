//! Phone verification records and outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link between a phone number and the token service's verifiable data.
///
/// Created once per verification attempt and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiablePhone {
    pub id: i64,
    pub phone_number_id: i64,
    pub verifiable_data_id: i64,
    pub created_at: DateTime<Utc>,
}

/// One verification attempt for a verifiable phone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneVerificationRequest {
    pub id: i64,
    pub verifiable_phone_id: i64,
    /// Request id assigned by the token service
    pub verification_request_id: i64,
    pub channel: VerificationChannel,
    pub created_at: DateTime<Utc>,
}

/// Both records written for one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationLink {
    pub verifiable_phone: VerifiablePhone,
    pub request: PhoneVerificationRequest,
}

/// Channel used to deliver the tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationChannel {
    Sms,
}

impl VerificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationChannel::Sms => "SMS",
        }
    }
}

impl std::str::FromStr for VerificationChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SMS" => Ok(VerificationChannel::Sms),
            _ => Err(format!("Unknown verification channel: {}", s)),
        }
    }
}

/// Where the verification length is counted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationLengthBasis {
    /// Counted from the moment the request was created
    RequestCreation,
    /// Counted from the moment the token was redeemed
    Verification,
}

/// Lifecycle of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationState {
    Requested,
    Pending,
    Confirmed,
    Rejected,
    Failed,
}

/// Outcome reported to the caller after a token is redeemed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationResult {
    Success,
    Rejected,
    Failed,
}

impl ConfirmationResult {
    /// Terminal state reached by the attempt
    pub fn state(&self) -> VerificationState {
        match self {
            ConfirmationResult::Success => VerificationState::Confirmed,
            ConfirmationResult::Rejected => VerificationState::Rejected,
            ConfirmationResult::Failed => VerificationState::Failed,
        }
    }
}

/// Result of redeeming a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneVerificationResult {
    /// Absent when the token could not be tied to a verifiable phone
    pub verifiable_phone_id: Option<i64>,
    pub result: ConfirmationResult,
}

impl PhoneVerificationResult {
    pub fn failed() -> Self {
        Self {
            verifiable_phone_id: None,
            result: ConfirmationResult::Failed,
        }
    }
}
