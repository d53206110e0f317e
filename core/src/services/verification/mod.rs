//! Verification module for out-of-band phone number verification
//!
//! This module provides the verification request workflow:
//! - Token pair minting through a token service
//! - Atomic recording of the verifiable phone and its request
//! - Template rendering and SMS dispatch
//! - Token redemption into a confirmation result

mod config;
mod mock_token;
mod service;
mod template;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use mock_token::MockTokenService;
pub use service::PhoneVerificationService;
pub use template::DollarTemplateRenderer;
pub use traits::{SmsDispatchTrait, TemplateRenderer, VerificationTokenService};
pub use types::{
    verification_expiry, MessageEncoding, MintedTokens, OutboundSms, RedeemedToken, TokenOutcome,
    TokenVerificationRequest, VerificationReceipt, ACCEPT_TOKEN_VARIABLE, REJECT_TOKEN_VARIABLE,
};
