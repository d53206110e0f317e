//! Phone verification orchestrator

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use pn_shared::phone::mask_phone_number;

use crate::domain::entities::{
    ConfirmationResult, PhoneVerificationResult, VerificationChannel, VerificationLengthBasis,
    VerificationState,
};
use crate::errors::{DirectoryError, DomainResult, ValidationError, VerificationError};
use crate::repositories::{
    AreaRepository, CountryRepository, PhoneNumberRepository, VerificationRepository,
};
use crate::services::directory::DirectoryService;

use super::config::VerificationServiceConfig;
use super::traits::{SmsDispatchTrait, TemplateRenderer, VerificationTokenService};
use super::types::{
    verification_expiry, OutboundSms, TokenOutcome, VerificationReceipt, ACCEPT_TOKEN_VARIABLE,
    REJECT_TOKEN_VARIABLE,
};

/// Verification service binding phone numbers to token service requests
///
/// An attempt goes `Requested -> Pending` inside
/// [`create_verification_request`](Self::create_verification_request) and
/// ends in `Confirmed`, `Rejected` or `Failed` when one of its tokens is
/// redeemed through [`verify_phone_number`](Self::verify_phone_number).
pub struct PhoneVerificationService<C, A, P, V, T, S, R>
where
    C: CountryRepository,
    A: AreaRepository,
    P: PhoneNumberRepository,
    V: VerificationRepository,
    T: VerificationTokenService,
    S: SmsDispatchTrait,
    R: TemplateRenderer,
{
    /// Directory used to resolve the destination
    directory: Arc<DirectoryService<C, A, P, V>>,
    /// Storage for verifiable phones and their requests
    verification_repository: Arc<V>,
    /// Token service minting and redeeming token pairs
    token_service: Arc<T>,
    /// SMS dispatcher
    sms_dispatch: Arc<S>,
    /// Message template renderer
    renderer: Arc<R>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<C, A, P, V, T, S, R> PhoneVerificationService<C, A, P, V, T, S, R>
where
    C: CountryRepository,
    A: AreaRepository,
    P: PhoneNumberRepository,
    V: VerificationRepository,
    T: VerificationTokenService,
    S: SmsDispatchTrait,
    R: TemplateRenderer,
{
    pub fn new(
        directory: Arc<DirectoryService<C, A, P, V>>,
        verification_repository: Arc<V>,
        token_service: Arc<T>,
        sms_dispatch: Arc<S>,
        renderer: Arc<R>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            directory,
            verification_repository,
            token_service,
            sms_dispatch,
            renderer,
            config,
        }
    }

    /// Start a verification attempt for a phone number
    ///
    /// This method:
    /// 1. Checks that template, deadline and length basis are present
    /// 2. Resolves the callable phone number
    /// 3. Checks the verification length
    /// 4. Mints an accept/reject token pair
    /// 5. Records the verifiable phone and the request in one write
    /// 6. Renders the template with `$acceptToken` and `$rejectToken`
    /// 7. Dispatches exactly one SMS
    ///
    /// Nothing is retried. When dispatch fails the recorded attempt stays in
    /// place and the error is returned.
    ///
    /// # Arguments
    ///
    /// * `phone_number_id` - Phone number to verify
    /// * `template` - Message template
    /// * `deadline` - Tokens cannot be redeemed after this instant
    /// * `verification_length` - Seconds a successful verification stays valid
    /// * `length_basis` - Where `verification_length` is counted from
    pub async fn create_verification_request(
        &self,
        phone_number_id: i64,
        template: Option<&str>,
        deadline: Option<DateTime<Utc>>,
        verification_length: i64,
        length_basis: Option<VerificationLengthBasis>,
    ) -> DomainResult<VerificationReceipt> {
        let template = template.ok_or_else(|| ValidationError::required("template"))?;
        let deadline = deadline.ok_or_else(|| ValidationError::required("deadline"))?;
        let length_basis =
            length_basis.ok_or_else(|| ValidationError::required("length_basis"))?;

        let destination = self
            .directory
            .get_callable_phone_number(phone_number_id)
            .await?
            .ok_or(DirectoryError::NoSuchPhoneNumber { phone_number_id })?;

        if verification_length <= 0 {
            return Err(VerificationError::NonPositiveVerificationLength {
                length: verification_length,
            }
            .into());
        }
        // Redemption happens by the deadline, so validity counted from there must fit
        if verification_expiry(deadline, verification_length).is_none() {
            return Err(VerificationError::VerificationLengthOutOfRange {
                length: verification_length,
            }
            .into());
        }

        tracing::debug!(
            phone_number_id = phone_number_id,
            state = ?VerificationState::Requested,
            event = "verification_requested",
            "Starting phone verification"
        );

        let tokens = self
            .token_service
            .mint(deadline, verification_length, length_basis)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone_number_id = phone_number_id,
                    error = %e,
                    event = "token_mint_failed",
                    "Failed to mint verification tokens"
                );
                VerificationError::TokenService { message: e }
            })?;

        let minted_request = self
            .token_service
            .find_verification_request(tokens.verification_request_id)
            .await
            .map_err(|e| VerificationError::TokenService { message: e })?
            .ok_or(VerificationError::NoSuchVerificationRequest {
                verification_request_id: tokens.verification_request_id,
            })?;
        if minted_request.verifiable_data_id != tokens.verifiable_data_id {
            tracing::error!(
                verification_request_id = tokens.verification_request_id,
                expected = tokens.verifiable_data_id,
                actual = minted_request.verifiable_data_id,
                event = "token_request_mismatch",
                "Verification request is bound to different verifiable data"
            );
            return Err(VerificationError::NoSuchVerifiableData {
                verifiable_data_id: tokens.verifiable_data_id,
            }
            .into());
        }

        let link = self
            .verification_repository
            .create_link(
                phone_number_id,
                tokens.verifiable_data_id,
                tokens.verification_request_id,
                VerificationChannel::Sms,
            )
            .await?;

        let variables = HashMap::from([
            (ACCEPT_TOKEN_VARIABLE.to_string(), tokens.accept_token),
            (REJECT_TOKEN_VARIABLE.to_string(), tokens.reject_token),
        ]);
        let body = self
            .renderer
            .render(template, &variables)
            .map_err(|e| VerificationError::TemplateRendering { message: e })?;

        let message = OutboundSms {
            encoding: self.config.encoding_for(&body),
            flash: self.config.flash_sms,
            body,
        };

        let masked = mask_phone_number(&destination.international_destination());
        let message_id = self
            .sms_dispatch
            .send(&destination, &message)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %masked,
                    verifiable_phone_id = link.verifiable_phone.id,
                    error = %e,
                    event = "verification_dispatch_failed",
                    "Failed to dispatch verification message"
                );
                VerificationError::Dispatch { message: e }
            })?;

        tracing::info!(
            phone = %masked,
            verifiable_phone_id = link.verifiable_phone.id,
            verification_request_id = tokens.verification_request_id,
            message_id = %message_id,
            encoding = ?message.encoding,
            event = "verification_pending",
            "Verification message dispatched"
        );

        Ok(VerificationReceipt {
            verifiable_phone_id: link.verifiable_phone.id,
            phone_verification_request_id: link.request.id,
            verifiable_data_id: tokens.verifiable_data_id,
            verification_request_id: tokens.verification_request_id,
            message_id,
            state: VerificationState::Pending,
        })
    }

    /// Redeem a token and report the outcome for its verifiable phone
    ///
    /// Unknown, used or expired tokens and tokens whose phone cannot be
    /// resolved all give `Failed`; only the first two come without an id.
    pub async fn verify_phone_number(
        &self,
        token: Option<&str>,
    ) -> DomainResult<PhoneVerificationResult> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ValidationError::required("token"))?;

        let Some(redeemed) = self
            .token_service
            .redeem(token)
            .await
            .map_err(|e| VerificationError::TokenService { message: e })?
        else {
            tracing::warn!(event = "verification_token_unknown", "Unknown or used token");
            return Ok(PhoneVerificationResult::failed());
        };

        let Some(verifiable_phone) = self
            .verification_repository
            .find_by_verifiable_data_id(redeemed.verifiable_data_id)
            .await?
        else {
            tracing::warn!(
                verifiable_data_id = redeemed.verifiable_data_id,
                event = "verification_phone_unresolved",
                "Redeemed token is not linked to a verifiable phone"
            );
            return Ok(PhoneVerificationResult::failed());
        };

        let result = match redeemed.outcome {
            TokenOutcome::Verified => ConfirmationResult::Success,
            TokenOutcome::Rejected => ConfirmationResult::Rejected,
            TokenOutcome::Other => ConfirmationResult::Failed,
        };

        tracing::info!(
            verifiable_phone_id = verifiable_phone.id,
            state = ?result.state(),
            verified_until = ?redeemed.verified_until,
            event = "verification_completed",
            "Phone verification completed"
        );

        Ok(PhoneVerificationResult {
            verifiable_phone_id: Some(verifiable_phone.id),
            result,
        })
    }
}
