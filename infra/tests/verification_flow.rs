//! Verification workflow delivered through the infrastructure SMS stack

use chrono::{Duration, Utc};
use std::sync::Arc;

use pn_core::domain::entities::{ConfirmationResult, VerificationLengthBasis};
use pn_core::errors::{DomainError, VerificationError};
use pn_core::repositories::MockDirectoryStore;
use pn_core::services::directory::MockDirectoryService;
use pn_core::services::verification::{
    DollarTemplateRenderer, MessageEncoding, MockTokenService, PhoneVerificationService,
    VerificationServiceConfig,
};
use pn_infra::sms::{MockSmsService, SmsDispatchAdapter};

const TEMPLATE: &str = "Accept: ${acceptToken}\nReject: ${rejectToken}";

struct Fixture {
    directory: Arc<MockDirectoryService>,
    outbox: MockSmsService,
    store: MockDirectoryStore,
}

impl Fixture {
    fn new() -> Self {
        let store = MockDirectoryStore::new();
        Self {
            directory: Arc::new(MockDirectoryService::from_store(&store)),
            outbox: MockSmsService::new(),
            store,
        }
    }

    fn service(
        &self,
        config: VerificationServiceConfig,
    ) -> PhoneVerificationService<
        MockDirectoryStore,
        MockDirectoryStore,
        MockDirectoryStore,
        MockDirectoryStore,
        MockTokenService,
        SmsDispatchAdapter,
        DollarTemplateRenderer,
    > {
        PhoneVerificationService::new(
            self.directory.clone(),
            Arc::new(self.store.clone()),
            Arc::new(MockTokenService::new()),
            Arc::new(SmsDispatchAdapter::new(Arc::new(self.outbox.clone()))),
            Arc::new(DollarTemplateRenderer::new()),
            config,
        )
    }

    async fn hungarian_phone(&self, extension: Option<&str>) -> i64 {
        self.directory
            .save_country(Some("HU"), Some("00"), Some("06"), Some("36"))
            .await
            .unwrap();
        let area = self
            .directory
            .save_area(Some("HU"), Some("30"), Some("T-mobile"), 7)
            .await
            .unwrap();
        self.directory
            .save_phone_number(area, Some("1234567"), extension)
            .await
            .unwrap()
    }

    fn token(&self, label: &str) -> String {
        let body = self.outbox.last_message().unwrap().message.body;
        body.lines()
            .find_map(|line| line.strip_prefix(label))
            .unwrap()
            .to_string()
    }
}

#[tokio::test]
async fn test_accept_token_through_sms_stack() {
    let fixture = Fixture::new();
    let service = fixture.service(VerificationServiceConfig::default());
    let phone = fixture.hungarian_phone(Some("42")).await;

    let receipt = service
        .create_verification_request(
            phone,
            Some(TEMPLATE),
            Some(Utc::now() + Duration::minutes(10)),
            3600,
            Some(VerificationLengthBasis::RequestCreation),
        )
        .await
        .unwrap();

    let sent = fixture.outbox.last_message().unwrap();
    assert_eq!(sent.to, "+36301234567");
    assert_eq!(sent.message.encoding, MessageEncoding::Gsm7);
    assert!(!sent.message.flash);

    let accept = fixture.token("Accept: ");
    let result = service.verify_phone_number(Some(&accept)).await.unwrap();
    assert_eq!(result.result, ConfirmationResult::Success);
    assert_eq!(result.verifiable_phone_id, Some(receipt.verifiable_phone_id));
}

#[tokio::test]
async fn test_reject_token_closes_the_pair() {
    let fixture = Fixture::new();
    let service = fixture.service(VerificationServiceConfig {
        flash_sms: true,
        force_unicode: true,
    });
    let phone = fixture.hungarian_phone(None).await;

    service
        .create_verification_request(
            phone,
            Some(TEMPLATE),
            Some(Utc::now() + Duration::minutes(10)),
            60,
            Some(VerificationLengthBasis::Verification),
        )
        .await
        .unwrap();

    let sent = fixture.outbox.last_message().unwrap();
    assert_eq!(sent.message.encoding, MessageEncoding::Ucs2);
    assert!(sent.message.flash);

    let accept = fixture.token("Accept: ");
    let reject = fixture.token("Reject: ");

    let rejected = service.verify_phone_number(Some(&reject)).await.unwrap();
    assert_eq!(rejected.result, ConfirmationResult::Rejected);

    let late_accept = service.verify_phone_number(Some(&accept)).await.unwrap();
    assert_eq!(late_accept.result, ConfirmationResult::Failed);
    assert_eq!(late_accept.verifiable_phone_id, None);
}

#[tokio::test]
async fn test_provider_failure_surfaces_as_dispatch_error() {
    let fixture = Fixture::new();
    fixture.outbox.set_simulate_failure(true);
    let service = fixture.service(VerificationServiceConfig::default());
    let phone = fixture.hungarian_phone(None).await;

    let result = service
        .create_verification_request(
            phone,
            Some(TEMPLATE),
            Some(Utc::now() + Duration::minutes(10)),
            3600,
            Some(VerificationLengthBasis::RequestCreation),
        )
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::Dispatch { .. }))
    ));
    assert_eq!(fixture.outbox.message_count(), 0);
}
