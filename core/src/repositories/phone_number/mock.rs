//! PhoneNumberRepository for the in-memory store

use async_trait::async_trait;

use crate::domain::entities::PhoneNumber;
use crate::errors::DomainError;
use crate::repositories::mock_store::{constraint_violation, MockDirectoryStore};

use super::trait_::PhoneNumberRepository;

#[async_trait]
impl PhoneNumberRepository for MockDirectoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<PhoneNumber>, DomainError> {
        let state = self.state.read().await;
        Ok(state.phone_numbers.get(&id).cloned())
    }

    async fn create(
        &self,
        area_id: i64,
        subscriber_number: &str,
        extension: Option<&str>,
    ) -> Result<i64, DomainError> {
        let mut state = self.state.write().await;

        if state.area(area_id).is_none() {
            return Err(constraint_violation(format!(
                "Cannot add phone number: area {} does not exist",
                area_id
            )));
        }

        let id = state.next_phone_number_id();
        state.phone_numbers.insert(
            id,
            PhoneNumber {
                id,
                area_id,
                subscriber_number: subscriber_number.to_string(),
                extension: extension.map(str::to_string),
            },
        );
        Ok(id)
    }

    async fn update(&self, phone_number: &PhoneNumber) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;

        if state.area(phone_number.area_id).is_none() {
            return Err(constraint_violation(format!(
                "Cannot update phone number: area {} does not exist",
                phone_number.area_id
            )));
        }

        match state.phone_numbers.get_mut(&phone_number.id) {
            Some(stored) => {
                *stored = phone_number.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
