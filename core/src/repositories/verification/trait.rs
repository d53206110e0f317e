//! Verification link repository trait.

use async_trait::async_trait;

use crate::domain::entities::{
    PhoneVerificationRequest, VerifiablePhone, VerificationChannel, VerificationLink,
};
use crate::errors::DomainError;

/// Append-only storage for verifiable phones and their verification requests
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Write a verifiable phone and its first verification request atomically
    ///
    /// Either both records are stored or neither is.
    ///
    /// # Arguments
    /// * `phone_number_id` - Phone number being verified
    /// * `verifiable_data_id` - Id minted by the token service
    /// * `verification_request_id` - Request id minted by the token service
    /// * `channel` - Delivery channel of the tokens
    async fn create_link(
        &self,
        phone_number_id: i64,
        verifiable_data_id: i64,
        verification_request_id: i64,
        channel: VerificationChannel,
    ) -> Result<VerificationLink, DomainError>;

    async fn find_verifiable_phone_by_id(
        &self,
        id: i64,
    ) -> Result<Option<VerifiablePhone>, DomainError>;

    /// Resolve the verifiable phone bound to token service data
    async fn find_by_verifiable_data_id(
        &self,
        verifiable_data_id: i64,
    ) -> Result<Option<VerifiablePhone>, DomainError>;

    /// Requests recorded for a verifiable phone, oldest first
    async fn find_requests_by_verifiable_phone_id(
        &self,
        verifiable_phone_id: i64,
    ) -> Result<Vec<PhoneVerificationRequest>, DomainError>;
}
