//! Traits for the token service, message dispatch and template integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::domain::entities::{CallablePhoneNumber, VerificationLengthBasis};

use super::types::{MintedTokens, OutboundSms, RedeemedToken, TokenVerificationRequest};

/// Trait for the verification token service
///
/// Single use of a token pair is the token service's guarantee.
#[async_trait]
pub trait VerificationTokenService: Send + Sync {
    /// Mint an accept/reject token pair valid until `deadline`
    async fn mint(
        &self,
        deadline: DateTime<Utc>,
        verification_length: i64,
        length_basis: VerificationLengthBasis,
    ) -> Result<MintedTokens, String>;

    /// Redeem a token. `None` when the token is unknown or already used.
    async fn redeem(&self, token: &str) -> Result<Option<RedeemedToken>, String>;

    /// Look up a minted verification request
    async fn find_verification_request(
        &self,
        verification_request_id: i64,
    ) -> Result<Option<TokenVerificationRequest>, String>;
}

/// Trait for SMS dispatch integration
#[async_trait]
pub trait SmsDispatchTrait: Send + Sync {
    /// Deliver a message and return the provider's message id
    async fn send(
        &self,
        destination: &CallablePhoneNumber,
        message: &OutboundSms,
    ) -> Result<String, String>;
}

/// Trait for message template rendering
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, variables: &HashMap<String, String>) -> Result<String, String>;
}
