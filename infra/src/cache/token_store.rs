//! Redis-backed verification token service
//!
//! Key layout, under the configured prefix:
//! - `{prefix}:token:{sha256(token)}` - which request a token belongs to and
//!   what it means when redeemed
//! - `{prefix}:request:{id}` - the minted verification request
//! - `{prefix}:request:{id}:redeemed` - claim marker making the pair single use
//! - `{prefix}:seq:*` - id counters
//!
//! Tokens never reach Redis in clear. Records expire a grace period after
//! their deadline, so a late redemption is still recognised and reported as
//! `TokenOutcome::Other` instead of looking like an unknown token.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use pn_core::domain::entities::VerificationLengthBasis;
use pn_core::services::verification::{
    verification_expiry, MintedTokens, RedeemedToken, TokenOutcome, TokenVerificationRequest,
    VerificationTokenService,
};

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// How long records outlive their deadline
pub const EXPIRED_RECORD_GRACE_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct TokenRecord {
    pub verification_request_id: i64,
    pub outcome: TokenOutcome,
    /// Hash of the other token of the pair
    pub sibling_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct RequestRecord {
    pub verifiable_data_id: i64,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub verification_length: i64,
    pub length_basis: VerificationLengthBasis,
}

/// Key builder for one prefix
#[derive(Debug, Clone)]
pub(crate) struct TokenKeys {
    prefix: String,
}

impl TokenKeys {
    pub(crate) fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub(crate) fn token(&self, token_hash: &str) -> String {
        format!("{}:token:{}", self.prefix, token_hash)
    }

    pub(crate) fn request(&self, verification_request_id: i64) -> String {
        format!("{}:request:{}", self.prefix, verification_request_id)
    }

    pub(crate) fn claim(&self, verification_request_id: i64) -> String {
        format!("{}:request:{}:redeemed", self.prefix, verification_request_id)
    }

    pub(crate) fn sequence(&self, name: &str) -> String {
        format!("{}:seq:{}", self.prefix, name)
    }
}

/// Token service storing hashed token pairs in Redis
#[derive(Clone)]
pub struct RedisTokenService {
    redis: RedisClient,
    keys: TokenKeys,
}

impl RedisTokenService {
    pub fn new(redis: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            redis,
            keys: TokenKeys::new(key_prefix),
        }
    }

    /// SHA-256 hex digest of a token
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn mint_tokens(
        &self,
        deadline: DateTime<Utc>,
        verification_length: i64,
        length_basis: VerificationLengthBasis,
    ) -> Result<MintedTokens, InfrastructureError> {
        let verifiable_data_id = self.redis.increment(&self.keys.sequence("verifiable_data")).await?;
        let verification_request_id = self
            .redis
            .increment(&self.keys.sequence("verification_request"))
            .await?;

        let now = Utc::now();
        let ttl = record_ttl_seconds(now, deadline);

        let accept_token = Uuid::new_v4().to_string();
        let reject_token = Uuid::new_v4().to_string();
        let accept_hash = Self::hash_token(&accept_token);
        let reject_hash = Self::hash_token(&reject_token);

        let request = RequestRecord {
            verifiable_data_id,
            deadline,
            created_at: now,
            verification_length,
            length_basis,
        };
        self.redis
            .set_with_expiry(
                &self.keys.request(verification_request_id),
                &to_json(&request)?,
                ttl,
            )
            .await?;

        for (hash, outcome, sibling) in [
            (&accept_hash, TokenOutcome::Verified, &reject_hash),
            (&reject_hash, TokenOutcome::Rejected, &accept_hash),
        ] {
            let record = TokenRecord {
                verification_request_id,
                outcome,
                sibling_hash: sibling.clone(),
            };
            self.redis
                .set_with_expiry(&self.keys.token(hash), &to_json(&record)?, ttl)
                .await?;
        }

        info!(
            event = "tokens_minted",
            verifiable_data_id = verifiable_data_id,
            verification_request_id = verification_request_id,
            ttl_seconds = ttl,
            "Verification tokens minted"
        );

        Ok(MintedTokens {
            verifiable_data_id,
            verification_request_id,
            accept_token,
            reject_token,
        })
    }

    async fn redeem_token(&self, token: &str) -> Result<Option<RedeemedToken>, InfrastructureError> {
        let token_hash = Self::hash_token(token);

        let Some(raw) = self.redis.get_and_delete(&self.keys.token(&token_hash)).await? else {
            debug!(event = "token_unknown", "Token not found or already used");
            return Ok(None);
        };
        let record: TokenRecord = from_json(&raw)?;

        let request_id = record.verification_request_id;
        let claimed = self
            .redis
            .set_if_absent(
                &self.keys.claim(request_id),
                "1",
                EXPIRED_RECORD_GRACE_SECONDS as u64,
            )
            .await?;
        // The sibling was redeemed first
        if !claimed {
            debug!(
                event = "token_pair_used",
                verification_request_id = request_id,
                "Token pair already redeemed"
            );
            return Ok(None);
        }
        self.redis.delete(&self.keys.token(&record.sibling_hash)).await?;

        let Some(raw_request) = self.redis.get(&self.keys.request(request_id)).await? else {
            warn!(
                event = "request_missing",
                verification_request_id = request_id,
                "Token outlived its verification request"
            );
            return Ok(None);
        };
        let request: RequestRecord = from_json(&raw_request)?;

        Ok(Some(resolve_redemption(&request, record.outcome, Utc::now())))
    }
}

/// Outcome of redeeming a token of `request` at `now`
pub(crate) fn resolve_redemption(
    request: &RequestRecord,
    outcome: TokenOutcome,
    now: DateTime<Utc>,
) -> RedeemedToken {
    if now > request.deadline {
        return RedeemedToken {
            verifiable_data_id: request.verifiable_data_id,
            outcome: TokenOutcome::Other,
            verified_until: None,
        };
    }

    let verified_until = match outcome {
        TokenOutcome::Verified => {
            let start = match request.length_basis {
                VerificationLengthBasis::RequestCreation => request.created_at,
                VerificationLengthBasis::Verification => now,
            };
            let until = verification_expiry(start, request.verification_length);
            if until.is_none() {
                warn!(
                    event = "verification_length_out_of_range",
                    verification_length = request.verification_length,
                    "Verification validity is not representable"
                );
            }
            until
        }
        TokenOutcome::Rejected | TokenOutcome::Other => None,
    };

    RedeemedToken {
        verifiable_data_id: request.verifiable_data_id,
        outcome,
        verified_until,
    }
}

/// Seconds until the deadline plus the grace period, at least one
pub(crate) fn record_ttl_seconds(now: DateTime<Utc>, deadline: DateTime<Utc>) -> u64 {
    let remaining = (deadline - now).num_seconds().max(0);
    (remaining + EXPIRED_RECORD_GRACE_SECONDS).max(1) as u64
}

fn to_json<T: Serialize>(value: &T) -> Result<String, InfrastructureError> {
    serde_json::to_string(value).map_err(|e| InfrastructureError::Data(e.to_string()))
}

fn from_json<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T, InfrastructureError> {
    serde_json::from_str(raw).map_err(|e| InfrastructureError::Data(e.to_string()))
}

#[async_trait]
impl VerificationTokenService for RedisTokenService {
    async fn mint(
        &self,
        deadline: DateTime<Utc>,
        verification_length: i64,
        length_basis: VerificationLengthBasis,
    ) -> Result<MintedTokens, String> {
        self.mint_tokens(deadline, verification_length, length_basis)
            .await
            .map_err(|e| e.to_string())
    }

    async fn redeem(&self, token: &str) -> Result<Option<RedeemedToken>, String> {
        self.redeem_token(token).await.map_err(|e| e.to_string())
    }

    async fn find_verification_request(
        &self,
        verification_request_id: i64,
    ) -> Result<Option<TokenVerificationRequest>, String> {
        let raw = self
            .redis
            .get(&self.keys.request(verification_request_id))
            .await
            .map_err(|e| e.to_string())?;

        raw.map(|raw| {
            from_json::<RequestRecord>(&raw)
                .map(|r| TokenVerificationRequest {
                    verifiable_data_id: r.verifiable_data_id,
                    deadline: r.deadline,
                })
                .map_err(|e| e.to_string())
        })
        .transpose()
    }
}
