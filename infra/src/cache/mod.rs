//! Cache module for Redis-backed state
//!
//! Holds the verification token service and the retrying Redis client it
//! runs on.

pub mod redis_client;
pub mod token_store;


pub use redis_client::RedisClient;
pub use token_store::RedisTokenService;

pub use pn_shared::CacheConfig;

use crate::InfrastructureError;

/// Connect to Redis and build the token service under the configured prefix
pub async fn connect_token_service(
    config: &CacheConfig,
) -> Result<RedisTokenService, InfrastructureError> {
    let client = RedisClient::new(config).await?;
    Ok(RedisTokenService::new(client, config.key_prefix.clone()))
}
