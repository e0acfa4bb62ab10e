use crate::error::CacheError;
use crate::repository::ShortUrlMapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// A cache for URL mappings.
///
/// This trait provides a domain-specific caching abstraction for
/// [`ShortUrlMapping`]s, using [`ShortCode`] as the key. Mappings never
/// change once saved, so entries need no invalidation.
#[async_trait]
pub trait UrlCache: Send + Sync + 'static {
    /// Get a mapping from cache.
    ///
    /// Returns `Ok(None)` if the key is not in the cache.
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrlMapping>>;

    /// Store a mapping in cache.
    async fn put(&self, code: &ShortCode, mapping: &ShortUrlMapping) -> Result<()>;
}
