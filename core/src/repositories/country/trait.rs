//! Country repository trait defining the interface for country persistence.

use async_trait::async_trait;
use pn_shared::PageWindow;

use crate::domain::entities::Country;
use crate::errors::DomainError;

/// Repository trait for Country persistence operations
///
/// Countries are keyed by their code and are never deleted, only
/// deactivated. Implementations enforce the storage constraints (code length,
/// primary key) and report violations as `DomainError::Database`.
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// Find a country by its code, active or not
    ///
    /// # Returns
    /// * `Ok(Some(Country))` - Country found
    /// * `Ok(None)` - No country with this code
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_code(&self, code: &str) -> Result<Option<Country>, DomainError>;

    /// Insert a new country
    ///
    /// # Returns
    /// * `Ok(Country)` - The stored country
    /// * `Err(DomainError::Database)` - Code too long or already present
    async fn create(&self, country: Country) -> Result<Country, DomainError>;

    /// List active countries in insertion order
    async fn list_active(&self, window: PageWindow) -> Result<Vec<Country>, DomainError>;

    /// Deactivate a country together with all of its areas
    ///
    /// # Returns
    /// * `Ok(true)` - Country existed and is now inactive
    /// * `Ok(false)` - No country with this code
    async fn deactivate(&self, code: &str) -> Result<bool, DomainError>;
}
