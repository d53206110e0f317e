//! Unit tests for the phone verification service

use chrono::{Duration, Utc};

use crate::domain::entities::{ConfirmationResult, VerificationLengthBasis, VerificationState};
use crate::errors::{DirectoryError, DomainError, ErrorCategory, ValidationError, VerificationError};
use crate::repositories::VerificationRepository;
use crate::services::verification::{
    verification_expiry, MessageEncoding, MockTokenService, TokenOutcome, VerificationServiceConfig,
    VerificationTokenService,
};

use super::mocks::{fixture, fixture_with, FailingRenderer, TEMPLATE};

fn later() -> Option<chrono::DateTime<Utc>> {
    Some(Utc::now() + Duration::hours(1))
}

fn basis() -> Option<VerificationLengthBasis> {
    Some(VerificationLengthBasis::RequestCreation)
}

#[tokio::test]
async fn test_create_verification_request_dispatches_one_message() {
    let f = fixture().await;

    let receipt = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap();

    assert_eq!(receipt.state, VerificationState::Pending);
    assert_eq!(receipt.message_id, "mock-msg-1");
    assert_eq!(f.sms.sent_count(), 1);

    let (destination, sms) = f.sms.last_message().unwrap();
    assert_eq!(destination.international_destination(), "+36301234567");
    assert_eq!(sms.encoding, MessageEncoding::Gsm7);
    assert!(!sms.flash);

    let (accept, reject) = f.sms.last_tokens();
    assert_ne!(accept, reject);
    assert!(!sms.body.contains('$'));

    let link = f
        .store
        .find_by_verifiable_data_id(receipt.verifiable_data_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(link.id, receipt.verifiable_phone_id);
    assert_eq!(link.phone_number_id, f.phone_number_id);
}

#[tokio::test]
async fn test_accept_token_confirms() {
    let f = fixture().await;
    let receipt = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap();
    let (accept, _) = f.sms.last_tokens();

    let result = f.service.verify_phone_number(Some(&accept)).await.unwrap();
    assert_eq!(result.verifiable_phone_id, Some(receipt.verifiable_phone_id));
    assert_eq!(result.result, ConfirmationResult::Success);
    assert_eq!(result.result.state(), VerificationState::Confirmed);
}

#[tokio::test]
async fn test_reject_token_rejects() {
    let f = fixture().await;
    let receipt = f
        .service
        .create_verification_request(
            f.phone_number_id,
            Some(TEMPLATE),
            later(),
            60,
            Some(VerificationLengthBasis::Verification),
        )
        .await
        .unwrap();
    let (_, reject) = f.sms.last_tokens();

    let result = f.service.verify_phone_number(Some(&reject)).await.unwrap();
    assert_eq!(result.verifiable_phone_id, Some(receipt.verifiable_phone_id));
    assert_eq!(result.result, ConfirmationResult::Rejected);
}

#[tokio::test]
async fn test_token_pair_is_single_use() {
    let f = fixture().await;
    f.service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap();
    let (accept, reject) = f.sms.last_tokens();

    f.service.verify_phone_number(Some(&accept)).await.unwrap();

    for token in [&accept, &reject] {
        let again = f.service.verify_phone_number(Some(token)).await.unwrap();
        assert_eq!(again.verifiable_phone_id, None);
        assert_eq!(again.result, ConfirmationResult::Failed);
    }
    assert_eq!(f.tokens.live_token_count().await, 0);
}

#[tokio::test]
async fn test_expired_tokens_fail() {
    let f = fixture().await;
    let deadline = Some(Utc::now() + Duration::milliseconds(150));

    f.service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), deadline, 1, basis())
        .await
        .unwrap();
    let (accept, _) = f.sms.last_tokens();
    f.service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), deadline, 1, basis())
        .await
        .unwrap();
    let (_, reject) = f.sms.last_tokens();

    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    for token in [accept, reject] {
        let result = f.service.verify_phone_number(Some(&token)).await.unwrap();
        assert_eq!(result.result, ConfirmationResult::Failed);
    }
}

#[tokio::test]
async fn test_unknown_token_fails_without_id() {
    let f = fixture().await;
    let result = f.service.verify_phone_number(Some("Test-UUID")).await.unwrap();
    assert_eq!(result.verifiable_phone_id, None);
    assert_eq!(result.result, ConfirmationResult::Failed);
}

#[tokio::test]
async fn test_verify_requires_token() {
    let f = fixture().await;
    for token in [None, Some(""), Some("   ")] {
        let result = f.service.verify_phone_number(token).await;
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::RequiredField { .. }))
        ));
    }
}

#[tokio::test]
async fn test_create_requires_arguments() {
    let f = fixture().await;
    let id = f.phone_number_id;

    let no_template = f
        .service
        .create_verification_request(id, None, later(), 1, basis())
        .await;
    let no_deadline = f
        .service
        .create_verification_request(id, Some(""), None, 1, basis())
        .await;
    let no_basis = f
        .service
        .create_verification_request(id, Some(""), later(), 1, None)
        .await;

    for result in [no_template, no_deadline, no_basis] {
        let err = result.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidArgument);
    }
    assert_eq!(f.sms.sent_count(), 0);
}

#[tokio::test]
async fn test_create_unknown_phone_number() {
    let f = fixture().await;
    let result = f
        .service
        .create_verification_request(0, Some(""), later(), 1, basis())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Directory(DirectoryError::NoSuchPhoneNumber { phone_number_id: 0 }))
    ));
}

#[tokio::test]
async fn test_create_non_positive_length() {
    let f = fixture().await;
    let result = f
        .service
        .create_verification_request(f.phone_number_id, Some(""), later(), 0, basis())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(
            VerificationError::NonPositiveVerificationLength { length: 0 }
        ))
    ));
    assert_eq!(f.tokens.live_token_count().await, 0);
}

#[tokio::test]
async fn test_create_unrepresentable_length() {
    let f = fixture().await;
    for length in [10_000_000_000_000, i64::MAX] {
        let result = f
            .service
            .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), length, basis())
            .await;
        match result {
            Err(DomainError::Verification(error)) => {
                assert_eq!(error, VerificationError::VerificationLengthOutOfRange { length });
                assert_eq!(error.category(), ErrorCategory::PolicyViolation);
            }
            other => panic!("Expected out of range length, got {:?}", other),
        }
    }
    assert_eq!(f.tokens.live_token_count().await, 0);
    assert_eq!(f.sms.sent_count(), 0);
}

#[tokio::test]
async fn test_long_but_representable_length_confirms() {
    let f = fixture().await;
    // About a thousand years
    let length = 1000 * 365 * 24 * 60 * 60;
    f.service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), length, basis())
        .await
        .unwrap();
    let (accept, _) = f.sms.last_tokens();

    let result = f.service.verify_phone_number(Some(&accept)).await.unwrap();
    assert_eq!(result.result, ConfirmationResult::Success);
}

#[tokio::test]
async fn test_token_service_redeems_unrepresentable_validity() {
    let tokens = MockTokenService::new();
    let minted = tokens
        .mint(
            Utc::now() + Duration::minutes(5),
            i64::MAX,
            VerificationLengthBasis::Verification,
        )
        .await
        .unwrap();

    let redeemed = tokens.redeem(&minted.accept_token).await.unwrap().unwrap();
    assert_eq!(redeemed.outcome, TokenOutcome::Verified);
    assert_eq!(redeemed.verified_until, None);
}

#[test]
fn test_verification_expiry() {
    let start = Utc::now();
    assert_eq!(verification_expiry(start, 60), Some(start + Duration::seconds(60)));
    assert_eq!(verification_expiry(start, i64::MAX), None);
    assert_eq!(verification_expiry(start, 10_000_000_000_000), None);
}

#[tokio::test]
async fn test_create_for_deactivated_area_is_not_callable() {
    let f = fixture().await;
    let area = f
        .directory
        .get_active_area_by_country_and_call_number(Some("HU"), Some("30"))
        .await
        .unwrap()
        .unwrap();
    f.directory.deactivate_area(area.id).await.unwrap();

    let result = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Directory(DirectoryError::NoSuchPhoneNumber { .. }))
    ));
    assert_eq!(f.tokens.live_token_count().await, 0);
}

#[tokio::test]
async fn test_dispatch_failure_keeps_link_records() {
    let f = fixture_with(
        crate::services::verification::DollarTemplateRenderer::new(),
        true,
        VerificationServiceConfig::default(),
    )
    .await;

    let result = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::Dispatch { .. })
    ));
    assert_eq!(err.category(), ErrorCategory::Internal);
    assert_eq!(f.store.verifiable_phone_count().await, 1);
    assert_eq!(f.store.verification_request_count().await, 1);
}

#[tokio::test]
async fn test_render_failure_is_internal() {
    let f = fixture_with(FailingRenderer, false, VerificationServiceConfig::default()).await;

    let err = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::TemplateRendering { .. })
    ));
    assert_eq!(err.category(), ErrorCategory::Internal);
    assert_eq!(f.sms.sent_count(), 0);
}

#[tokio::test]
async fn test_token_service_failure() {
    let f = fixture().await;
    f.tokens.set_should_fail(true);

    let err = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::TokenService { .. })
    ));
    assert_eq!(f.store.verifiable_phone_count().await, 0);
}

#[tokio::test]
async fn test_lost_verification_request_is_consistency_error() {
    let f = fixture().await;
    f.tokens.set_forget_requests(true);

    let err = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::NoSuchVerificationRequest { .. })
    ));
    assert_eq!(f.store.verifiable_phone_count().await, 0);
    assert_eq!(f.sms.sent_count(), 0);
}

#[tokio::test]
async fn test_misbound_verification_request_is_consistency_error() {
    let f = fixture().await;
    f.tokens.set_misbind_requests(true);

    let err = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::NoSuchVerifiableData { .. })
    ));
}

#[tokio::test]
async fn test_concurrent_attempts_are_independent() {
    let f = fixture().await;

    let first = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap();
    let (first_accept, _) = f.sms.last_tokens();
    let second = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap();
    let (_, second_reject) = f.sms.last_tokens();

    assert_ne!(first.verifiable_phone_id, second.verifiable_phone_id);

    let a = f.service.verify_phone_number(Some(&first_accept)).await.unwrap();
    let b = f.service.verify_phone_number(Some(&second_reject)).await.unwrap();
    assert_eq!(a.verifiable_phone_id, Some(first.verifiable_phone_id));
    assert_eq!(a.result, ConfirmationResult::Success);
    assert_eq!(b.verifiable_phone_id, Some(second.verifiable_phone_id));
    assert_eq!(b.result, ConfirmationResult::Rejected);
}

#[tokio::test]
async fn test_callable_number_by_verifiable_id() {
    let f = fixture().await;
    let receipt = f
        .service
        .create_verification_request(f.phone_number_id, Some(TEMPLATE), later(), 60, basis())
        .await
        .unwrap();

    let callable = f
        .directory
        .get_callable_phone_number_by_verifiable_id(receipt.verifiable_phone_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(callable.subscriber_number, "1234567");
    assert_eq!(callable.area_call_number, "30");
}

#[tokio::test]
async fn test_flash_and_unicode_from_config() {
    let config = VerificationServiceConfig {
        flash_sms: true,
        force_unicode: false,
    };
    let f = fixture_with(
        crate::services::verification::DollarTemplateRenderer::new(),
        false,
        config,
    )
    .await;

    f.service
        .create_verification_request(
            f.phone_number_id,
            Some("Kód: $acceptToken"),
            later(),
            60,
            basis(),
        )
        .await
        .unwrap();

    let (_, sms) = f.sms.last_message().unwrap();
    assert!(sms.flash);
    assert_eq!(sms.encoding, MessageEncoding::Ucs2);
}
