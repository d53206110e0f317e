//! In-memory verification token service
//!
//! Mirrors the Redis implementation's semantics: a pair is single use,
//! redemption after the deadline reports `TokenOutcome::Other`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::VerificationLengthBasis;

use super::traits::VerificationTokenService;
use super::types::{
    verification_expiry, MintedTokens, RedeemedToken, TokenOutcome, TokenVerificationRequest,
};

#[derive(Debug, Clone)]
struct MintedRequest {
    verifiable_data_id: i64,
    deadline: DateTime<Utc>,
    created_at: DateTime<Utc>,
    verification_length: i64,
    length_basis: VerificationLengthBasis,
    accept_token: String,
    reject_token: String,
}

#[derive(Debug, Default)]
struct TokenState {
    next_verifiable_data_id: i64,
    next_verification_request_id: i64,
    requests: HashMap<i64, MintedRequest>,
    /// token -> (verification request id, outcome when redeemed in time)
    tokens: HashMap<String, (i64, TokenOutcome)>,
}

/// Mock token service for tests and local development
#[derive(Clone, Default)]
pub struct MockTokenService {
    state: Arc<RwLock<TokenState>>,
    should_fail: Arc<AtomicBool>,
    forget_requests: Arc<AtomicBool>,
    misbind_requests: Arc<AtomicBool>,
}

impl MockTokenService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with a transport error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Make `find_verification_request` report nothing, as if the request
    /// had been lost right after minting
    pub fn set_forget_requests(&self, forget: bool) {
        self.forget_requests.store(forget, Ordering::SeqCst);
    }

    /// Make `find_verification_request` report a different verifiable data
    /// id than the one minted
    pub fn set_misbind_requests(&self, misbind: bool) {
        self.misbind_requests.store(misbind, Ordering::SeqCst);
    }

    /// Number of tokens that can still be redeemed
    pub async fn live_token_count(&self) -> usize {
        self.state.read().await.tokens.len()
    }

    fn check_available(&self) -> Result<(), String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Token service unavailable".to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationTokenService for MockTokenService {
    async fn mint(
        &self,
        deadline: DateTime<Utc>,
        verification_length: i64,
        length_basis: VerificationLengthBasis,
    ) -> Result<MintedTokens, String> {
        self.check_available()?;
        let mut state = self.state.write().await;

        state.next_verifiable_data_id += 1;
        state.next_verification_request_id += 1;
        let verifiable_data_id = state.next_verifiable_data_id;
        // Offset so the two id spaces never line up by accident
        let verification_request_id = 1000 + state.next_verification_request_id;

        let accept_token = Uuid::new_v4().to_string();
        let reject_token = Uuid::new_v4().to_string();

        state.requests.insert(
            verification_request_id,
            MintedRequest {
                verifiable_data_id,
                deadline,
                created_at: Utc::now(),
                verification_length,
                length_basis,
                accept_token: accept_token.clone(),
                reject_token: reject_token.clone(),
            },
        );
        state.tokens.insert(
            accept_token.clone(),
            (verification_request_id, TokenOutcome::Verified),
        );
        state.tokens.insert(
            reject_token.clone(),
            (verification_request_id, TokenOutcome::Rejected),
        );

        Ok(MintedTokens {
            verifiable_data_id,
            verification_request_id,
            accept_token,
            reject_token,
        })
    }

    async fn redeem(&self, token: &str) -> Result<Option<RedeemedToken>, String> {
        self.check_available()?;
        let mut state = self.state.write().await;

        let Some((request_id, outcome)) = state.tokens.remove(token) else {
            return Ok(None);
        };
        let Some(request) = state.requests.get(&request_id).cloned() else {
            return Ok(None);
        };
        // Burn the sibling token as well
        state.tokens.remove(&request.accept_token);
        state.tokens.remove(&request.reject_token);

        let now = Utc::now();
        if now > request.deadline {
            return Ok(Some(RedeemedToken {
                verifiable_data_id: request.verifiable_data_id,
                outcome: TokenOutcome::Other,
                verified_until: None,
            }));
        }

        let verified_until = match outcome {
            TokenOutcome::Verified => {
                let start = match request.length_basis {
                    VerificationLengthBasis::RequestCreation => request.created_at,
                    VerificationLengthBasis::Verification => now,
                };
                verification_expiry(start, request.verification_length)
            }
            TokenOutcome::Rejected | TokenOutcome::Other => None,
        };

        Ok(Some(RedeemedToken {
            verifiable_data_id: request.verifiable_data_id,
            outcome,
            verified_until,
        }))
    }

    async fn find_verification_request(
        &self,
        verification_request_id: i64,
    ) -> Result<Option<TokenVerificationRequest>, String> {
        self.check_available()?;
        if self.forget_requests.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let offset = if self.misbind_requests.load(Ordering::SeqCst) {
            1_000_000
        } else {
            0
        };
        let state = self.state.read().await;
        Ok(state
            .requests
            .get(&verification_request_id)
            .map(|r| TokenVerificationRequest {
                verifiable_data_id: r.verifiable_data_id + offset,
                deadline: r.deadline,
            }))
    }
}
