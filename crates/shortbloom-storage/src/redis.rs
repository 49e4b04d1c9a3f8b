use async_trait::async_trait;
use deadpool_redis::redis::{AsyncCommands, RedisError};
use deadpool_redis::{Config, Connection, Pool, PoolConfig, PoolError, Runtime};
use shortbloom_core::repository::{Repository, Result};
use shortbloom_core::{ShortCode, StorageError};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Default prefix for keys written by the shortener.
pub const DEFAULT_KEY_PREFIX: &str = "sb:url:";

/// Connection settings for [`RedisRepository`].
///
/// # Example
///
/// ```rust
/// use shortbloom_storage::RedisRepositoryConfig;
/// use std::time::Duration;
///
/// let config = RedisRepositoryConfig::builder()
///     .url("redis://127.0.0.1:6379")
///     .op_timeout(Duration::from_millis(500))
///     .build();
/// assert_eq!(config.key_prefix, "sb:url:");
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisRepositoryConfig {
    /// Redis connection URL, e.g. `redis://127.0.0.1:6379`.
    #[builder(setter(into))]
    pub url: String,

    /// Prefix prepended to every short code to form the Redis key.
    #[builder(default = DEFAULT_KEY_PREFIX.to_string(), setter(into))]
    pub key_prefix: String,

    /// Upper bound for one operation, including waiting for a pooled connection.
    #[builder(default = Duration::from_secs(2))]
    pub op_timeout: Duration,

    /// Maximum number of pooled connections.
    #[builder(default = 16)]
    pub pool_size: usize,
}

/// A Redis-backed implementation of [`Repository`].
///
/// URLs are stored as plain string values under `{key_prefix}{code}`. A
/// connection is checked out of the pool for each operation and returned as
/// soon as the operation finishes, whether it succeeded or not.
#[derive(Clone)]
pub struct RedisRepository {
    pool: Pool,
    key_prefix: String,
    op_timeout: Duration,
}

fn map_redis_error(operation: &str, err: RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StorageError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StorageError::Unavailable(message)
    } else {
        StorageError::Operation(message)
    }
}

fn map_pool_error(operation: &str, err: PoolError) -> StorageError {
    let message = format!("{operation}: {err}");
    match err {
        PoolError::Timeout(_) => StorageError::Timeout(message),
        _ => StorageError::Unavailable(message),
    }
}

impl RedisRepository {
    /// Creates the connection pool. No connection is opened until the first
    /// operation.
    pub fn new(config: RedisRepositoryConfig) -> Result<Self> {
        let mut pool_config = Config::from_url(config.url);
        pool_config.pool = Some(PoolConfig::new(config.pool_size));

        let pool = pool_config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| StorageError::Unavailable(format!("failed to create redis pool: {e}")))?;

        Ok(Self {
            pool,
            key_prefix: config.key_prefix,
            op_timeout: config.op_timeout,
        })
    }

    /// Generates the Redis key for a short code.
    fn key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }

    async fn connection(&self) -> Result<Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| map_pool_error("failed to get redis connection", e))
    }

    /// Runs `op` under the configured operation timeout.
    async fn timed<T, F>(&self, operation: &str, op: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(format!(
                "{operation}: no reply within {:?}",
                self.op_timeout
            ))),
        }
    }
}

impl std::fmt::Debug for RedisRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRepository")
            .field("key_prefix", &self.key_prefix)
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Repository for RedisRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let key = self.key(code);
        trace!(code = %code, "Fetching URL from Redis");

        let result = self
            .timed("get", async {
                let mut conn = self.connection().await?;
                conn.get::<_, Option<String>>(&key)
                    .await
                    .map_err(|e| map_redis_error("failed to fetch value from Redis", e))
            })
            .await;

        match result {
            Ok(Some(url)) => {
                debug!(code = %code, "Found URL in Redis");
                Ok(Some(url))
            }
            Ok(None) => {
                trace!(code = %code, "Short code not present in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Redis error on get");
                Err(e)
            }
        }
    }

    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        let key = self.key(code);
        trace!(code = %code, "Storing URL in Redis");

        self.timed("put", async {
            let mut conn = self.connection().await?;
            conn.set::<_, _, ()>(&key, url)
                .await
                .map_err(|e| map_redis_error("failed to write value to Redis", e))
        })
        .await
        .inspect_err(|e| warn!(code = %code, error = %e, "Failed to store URL in Redis"))
    }

    async fn insert(&self, code: &ShortCode, url: &str) -> Result<()> {
        let key = self.key(code);
        trace!(code = %code, "Claiming short code in Redis");

        let inserted = self
            .timed("insert", async {
                let mut conn = self.connection().await?;
                conn.set_nx::<_, _, bool>(&key, url)
                    .await
                    .map_err(|e| map_redis_error("failed to claim key in Redis", e))
            })
            .await
            .inspect_err(|e| warn!(code = %code, error = %e, "Failed to claim short code in Redis"))?;

        if inserted {
            debug!(code = %code, "Stored URL in Redis");
            Ok(())
        } else {
            debug!(code = %code, "Short code already taken in Redis");
            Err(StorageError::Conflict(code.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_repository() -> RedisRepository {
        // Port 1 is reserved; connections are refused immediately.
        let config = RedisRepositoryConfig::builder()
            .url("redis://127.0.0.1:1")
            .op_timeout(Duration::from_millis(500))
            .pool_size(1)
            .build();
        RedisRepository::new(config).unwrap()
    }

    #[test]
    fn key_format() {
        let repo = unreachable_repository();
        let code = ShortCode::new_unchecked("abc123");
        assert_eq!(repo.key(&code), "sb:url:abc123");
    }

    #[test]
    fn custom_prefix() {
        let config = RedisRepositoryConfig::builder()
            .url("redis://127.0.0.1:6379")
            .key_prefix("app:")
            .build();
        let repo = RedisRepository::new(config).unwrap();
        assert_eq!(repo.key(&ShortCode::new_unchecked("abc123")), "app:abc123");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let config = RedisRepositoryConfig::builder().url("not a url").build();
        assert!(matches!(
            RedisRepository::new(config),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_retriable_error() {
        let repo = unreachable_repository();
        let code = ShortCode::new_unchecked("abc123");

        let err = repo.get(&code).await.unwrap_err();
        assert!(err.is_retriable(), "unexpected error: {err:?}");

        let err = repo.insert(&code, "https://example.com").await.unwrap_err();
        assert!(err.is_retriable(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn timeout_maps_to_timeout_error() {
        let repo = unreachable_repository();

        let err = repo
            .timed("sleep", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Timeout(_)));
    }
}
