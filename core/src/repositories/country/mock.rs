//! CountryRepository for the in-memory store

use async_trait::async_trait;
use pn_shared::PageWindow;

use crate::domain::entities::{Country, COUNTRY_CODE_MAX_LENGTH};
use crate::errors::DomainError;
use crate::repositories::mock_store::{constraint_violation, MockDirectoryStore};

use super::trait_::CountryRepository;

#[async_trait]
impl CountryRepository for MockDirectoryStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Country>, DomainError> {
        let state = self.state.read().await;
        Ok(state.country(code).cloned())
    }

    async fn create(&self, country: Country) -> Result<Country, DomainError> {
        let mut state = self.state.write().await;

        if country.code.chars().count() > COUNTRY_CODE_MAX_LENGTH {
            return Err(constraint_violation(format!(
                "Data too long for column 'code': {}",
                country.code
            )));
        }
        if state.country(&country.code).is_some() {
            return Err(constraint_violation(format!(
                "Duplicate entry '{}' for key 'PRIMARY'",
                country.code
            )));
        }

        state.countries.push(country.clone());
        Ok(country)
    }

    async fn list_active(&self, window: PageWindow) -> Result<Vec<Country>, DomainError> {
        let state = self.state.read().await;
        Ok(window.apply(state.countries.iter().filter(|c| c.active).cloned()))
    }

    async fn deactivate(&self, code: &str) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;

        let Some(country) = state.countries.iter_mut().find(|c| c.code == code) else {
            return Ok(false);
        };
        country.active = false;

        for area in state.areas.iter_mut().filter(|a| a.country_code == code) {
            area.active = false;
        }
        Ok(true)
    }
}
