use async_trait::async_trait;
use pinhole_core::cache::{Result, UrlCache};
use pinhole_core::{CacheError, ShortCode, ShortUrlMapping};
use redis::AsyncCommands;
use tracing::{debug, trace, warn};

/// Key prefix used unless another one is configured.
pub const DEFAULT_KEY_PREFIX: &str = "short_url:";

/// A Redis-based implementation of [`UrlCache`].
///
/// This implementation stores mappings as JSON strings in Redis,
/// using a configurable key prefix. Keys carry no expiry.
#[derive(Debug, Clone)]
pub struct RedisUrlCache {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> CacheError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        CacheError::Timeout(message)
    } else if err.is_connection_dropped() || err.is_connection_refusal() || err.is_io_error() {
        CacheError::Unavailable(message)
    } else {
        CacheError::Operation(message)
    }
}

impl RedisUrlCache {
    /// Creates a new Redis URL cache using [`DEFAULT_KEY_PREFIX`].
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a new Redis URL cache with a custom key prefix.
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a client for `redis_url` and builds a cache on a multiplexed
    /// connection.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| CacheError::Unavailable(format!("invalid redis url: {e}")))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;
        Ok(Self::new(conn))
    }

    /// Generates the cache key for a short code.
    fn cache_key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }
}

#[async_trait]
impl UrlCache for RedisUrlCache {
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrlMapping>> {
        let key = self.cache_key(code);
        trace!(code = %code, "Fetching mapping from Redis cache");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(cached)) => {
                debug!(code = %code, "Cache hit in Redis");
                serde_json::from_str::<ShortUrlMapping>(&cached)
                    .map(Some)
                    .map_err(|e| {
                        warn!(code = %code, error = %e, "Failed to deserialize cached mapping");
                        CacheError::InvalidData(format!(
                            "invalid cached value for key '{key}': {e}"
                        ))
                    })
            }
            Ok(None) => {
                trace!(code = %code, "Cache miss in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch value from Redis", e))
            }
        }
    }

    async fn put(&self, code: &ShortCode, mapping: &ShortUrlMapping) -> Result<()> {
        let key = self.cache_key(code);

        let json = serde_json::to_string(mapping).map_err(|e| {
            warn!(code = %code, error = %e, "Failed to serialize mapping for caching");
            CacheError::Serialization(format!("failed to serialize cache value: {e}"))
        })?;

        let mut conn = self.conn.clone();
        match conn.set::<_, _, ()>(&key, json).await {
            Ok(()) => {
                debug!(code = %code, "Cached mapping in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Failed to cache mapping in Redis");
                Err(map_redis_error("failed to write value to Redis", e))
            }
        }
    }
}
