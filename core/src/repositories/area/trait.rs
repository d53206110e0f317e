//! Area repository trait.

use async_trait::async_trait;
use pn_shared::PageWindow;

use crate::domain::entities::{Area, NewArea};
use crate::errors::DomainError;

/// Repository trait for Area persistence operations
///
/// Lookups only ever return active areas.
#[async_trait]
pub trait AreaRepository: Send + Sync {
    /// Find an active area by id
    async fn find_active_by_id(&self, id: i64) -> Result<Option<Area>, DomainError>;

    /// Find the active area registered for a (country, call number) pair
    async fn find_active_by_country_and_call_number(
        &self,
        country_code: &str,
        call_number: &str,
    ) -> Result<Option<Area>, DomainError>;

    /// Insert a new active area and return its id
    ///
    /// Fails with `DomainError::Database` when the country does not exist.
    async fn create(&self, area: NewArea) -> Result<i64, DomainError>;

    /// List the active areas of a country in insertion order
    async fn list_active_by_country(
        &self,
        country_code: &str,
        window: PageWindow,
    ) -> Result<Vec<Area>, DomainError>;

    /// Deactivate an area, returning `false` when the id is unknown
    async fn deactivate(&self, id: i64) -> Result<bool, DomainError>;
}
