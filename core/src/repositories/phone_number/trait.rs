//! Phone number repository trait.

use async_trait::async_trait;

use crate::domain::entities::PhoneNumber;
use crate::errors::DomainError;

#[async_trait]
pub trait PhoneNumberRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<PhoneNumber>, DomainError>;

    /// Insert a phone number and return its id
    async fn create(
        &self,
        area_id: i64,
        subscriber_number: &str,
        extension: Option<&str>,
    ) -> Result<i64, DomainError>;

    /// Replace area, subscriber number and extension in one write.
    ///
    /// Returns `false` when the id is unknown.
    async fn update(&self, phone_number: &PhoneNumber) -> Result<bool, DomainError>;
}
