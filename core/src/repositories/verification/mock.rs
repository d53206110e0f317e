//! VerificationRepository for the in-memory store

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::{
    PhoneVerificationRequest, VerifiablePhone, VerificationChannel, VerificationLink,
};
use crate::errors::DomainError;
use crate::repositories::mock_store::{constraint_violation, MockDirectoryStore};

use super::trait_::VerificationRepository;

#[async_trait]
impl VerificationRepository for MockDirectoryStore {
    async fn create_link(
        &self,
        phone_number_id: i64,
        verifiable_data_id: i64,
        verification_request_id: i64,
        channel: VerificationChannel,
    ) -> Result<VerificationLink, DomainError> {
        // Both rows are staged under the write lock and only committed
        // together
        let mut state = self.state.write().await;

        if !state.phone_numbers.contains_key(&phone_number_id) {
            return Err(constraint_violation(format!(
                "Cannot add verifiable phone: phone number {} does not exist",
                phone_number_id
            )));
        }
        if state
            .verifiable_phones
            .values()
            .any(|vp| vp.verifiable_data_id == verifiable_data_id)
        {
            return Err(constraint_violation(format!(
                "Duplicate entry '{}' for key 'verifiable_data_id'",
                verifiable_data_id
            )));
        }

        if self.request_inserts_fail() {
            return Err(constraint_violation(
                "Cannot add verification request: simulated failure",
            ));
        }

        // Ids are only taken once nothing can fail anymore
        let now = Utc::now();
        let verifiable_phone = VerifiablePhone {
            id: state.next_verifiable_phone_id(),
            phone_number_id,
            verifiable_data_id,
            created_at: now,
        };
        let request = PhoneVerificationRequest {
            id: state.next_verification_request_id(),
            verifiable_phone_id: verifiable_phone.id,
            verification_request_id,
            channel,
            created_at: now,
        };

        state
            .verifiable_phones
            .insert(verifiable_phone.id, verifiable_phone.clone());
        state.verification_requests.insert(request.id, request.clone());

        Ok(VerificationLink {
            verifiable_phone,
            request,
        })
    }

    async fn find_verifiable_phone_by_id(
        &self,
        id: i64,
    ) -> Result<Option<VerifiablePhone>, DomainError> {
        let state = self.state.read().await;
        Ok(state.verifiable_phones.get(&id).cloned())
    }

    async fn find_by_verifiable_data_id(
        &self,
        verifiable_data_id: i64,
    ) -> Result<Option<VerifiablePhone>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .verifiable_phones
            .values()
            .find(|vp| vp.verifiable_data_id == verifiable_data_id)
            .cloned())
    }

    async fn find_requests_by_verifiable_phone_id(
        &self,
        verifiable_phone_id: i64,
    ) -> Result<Vec<PhoneVerificationRequest>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .verification_requests
            .values()
            .filter(|r| r.verifiable_phone_id == verifiable_phone_id)
            .cloned()
            .collect())
    }
}
