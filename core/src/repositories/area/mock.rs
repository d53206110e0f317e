//! AreaRepository for the in-memory store

use async_trait::async_trait;
use pn_shared::PageWindow;

use crate::domain::entities::{Area, NewArea};
use crate::errors::DomainError;
use crate::repositories::mock_store::{constraint_violation, MockDirectoryStore};

use super::trait_::AreaRepository;

#[async_trait]
impl AreaRepository for MockDirectoryStore {
    async fn find_active_by_id(&self, id: i64) -> Result<Option<Area>, DomainError> {
        let state = self.state.read().await;
        Ok(state.area(id).filter(|a| a.active).cloned())
    }

    async fn find_active_by_country_and_call_number(
        &self,
        country_code: &str,
        call_number: &str,
    ) -> Result<Option<Area>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .areas
            .iter()
            .find(|a| a.active && a.country_code == country_code && a.call_number == call_number)
            .cloned())
    }

    async fn create(&self, area: NewArea) -> Result<i64, DomainError> {
        let mut state = self.state.write().await;

        if state.country(&area.country_code).is_none() {
            return Err(constraint_violation(format!(
                "Cannot add area: country '{}' does not exist",
                area.country_code
            )));
        }

        let id = state.areas.len() as i64 + 1;
        state.areas.push(Area {
            id,
            country_code: area.country_code,
            call_number: area.call_number,
            name: area.name,
            subscriber_number_length: area.subscriber_number_length,
            active: true,
        });
        Ok(id)
    }

    async fn list_active_by_country(
        &self,
        country_code: &str,
        window: PageWindow,
    ) -> Result<Vec<Area>, DomainError> {
        let state = self.state.read().await;
        Ok(window.apply(
            state
                .areas
                .iter()
                .filter(|a| a.active && a.country_code == country_code)
                .cloned(),
        ))
    }

    async fn deactivate(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.area_mut(id) {
            Some(area) => {
                area.active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
