//! Redis client with retry logic
//!
//! A thin wrapper over a multiplexed connection exposing the handful of
//! commands the token service needs. Transient failures are retried with
//! exponential backoff capped at 5 seconds.

use redis::{aio::MultiplexedConnection, Client, Cmd, ErrorKind, FromRedisValue, RedisError, RedisResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use pn_shared::CacheConfig;

use crate::InfrastructureError;

const MAX_BACKOFF_MS: u64 = 5000;

/// Redis client wrapper with retry logic
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect using the cache configuration
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        info!(event = "redis_connect", url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(event = "redis_url_invalid", error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let max_retries = config.max_retries.max(1);
        let connection =
            Self::connect_with_retry(&client, max_retries, config.retry_delay_ms).await?;

        info!(event = "redis_ready", "Redis client created");
        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    async fn connect_with_retry(
        client: &Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_BACKOFF_MS);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// `SET key value EX seconds`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("EX").arg(expiry_seconds.max(1));
        self.run::<()>(&cmd).await?;
        Ok(())
    }

    /// `SET key value EX seconds NX`, returning whether the key was set
    pub async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<bool, InfrastructureError> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key)
            .arg(value)
            .arg("EX")
            .arg(expiry_seconds.max(1))
            .arg("NX");
        let reply: Option<String> = self.run(&cmd).await?;
        Ok(reply.is_some())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        Ok(self.run(&cmd).await?)
    }

    /// Read and delete a key in one step
    pub async fn get_and_delete(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut cmd = redis::cmd("GETDEL");
        cmd.arg(key);
        Ok(self.run(&cmd).await?)
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        let deleted: u32 = self.run(&cmd).await?;
        Ok(deleted > 0)
    }

    /// Increment a counter without expiry
    pub async fn increment(&self, key: &str) -> Result<i64, InfrastructureError> {
        let mut cmd = redis::cmd("INCR");
        cmd.arg(key);
        Ok(self.run(&cmd).await?)
    }

    /// Remaining time to live, `None` when the key is missing or persistent
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let mut cmd = redis::cmd("TTL");
        cmd.arg(key);
        let ttl: i64 = self.run(&cmd).await?;
        Ok((ttl >= 0).then_some(ttl))
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let reply: String = self.run(&redis::cmd("PING")).await?;
        Ok(reply == "PONG")
    }

    async fn run<T: FromRedisValue>(&self, cmd: &Cmd) -> RedisResult<T> {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let mut conn = self.connection.clone();

            match cmd.query_async::<_, T>(&mut conn).await {
                Ok(value) => return Ok(value),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_BACKOFF_MS);
                }
                Err(e) => {
                    debug!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Hide credentials in a Redis URL
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

/// Whether an error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        ErrorKind::IoError | ErrorKind::BusyLoadingError | ErrorKind::TryAgain
    )
}
