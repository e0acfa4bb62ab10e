use async_trait::async_trait;
use moka::future::Cache;
use pinhole_core::cache::{Result, UrlCache};
use pinhole_core::{ShortCode, ShortUrlMapping};
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// Entry bound used when no capacity is configured.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// An in-memory cache implementation using Moka.
///
/// This implementation stores mappings in a concurrent, high-performance
/// in-memory cache. Entries are only evicted to respect the capacity bound;
/// mappings are immutable, so nothing expires by default.
#[derive(Debug, Clone)]
pub struct MokaUrlCache {
    cache: Cache<ShortCode, ShortUrlMapping>,
}

impl MokaUrlCache {
    /// Creates a new Moka URL cache with default settings.
    ///
    /// The cache will have a default maximum capacity of 10,000 entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Creates a new Moka URL cache with a custom maximum capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_capacity).build();
        Self { cache }
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfig::builder()
    }

    /// Approximate number of cached entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for MokaUrlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for MokaUrlCache {
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrlMapping>> {
        match self.cache.get(code).await {
            Some(mapping) => {
                debug!(code = %code, "Cache hit in Moka");
                Ok(Some(mapping))
            }
            None => {
                trace!(code = %code, "Cache miss in Moka");
                Ok(None)
            }
        }
    }

    async fn put(&self, code: &ShortCode, mapping: &ShortUrlMapping) -> Result<()> {
        self.cache.insert(code.clone(), mapping.clone()).await;
        debug!(code = %code, "Cached mapping in Moka");
        Ok(())
    }
}

/// Configuration for creating a MokaUrlCache with custom settings.
#[derive(Debug, TypedBuilder, Default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default, setter(strip_option))]
    max_capacity: Option<u64>,
}

impl From<CacheConfig> for MokaUrlCache {
    fn from(config: CacheConfig) -> Self {
        Self::with_capacity(config.max_capacity.unwrap_or(DEFAULT_MAX_CAPACITY))
    }
}
