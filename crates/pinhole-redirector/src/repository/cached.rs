use async_trait::async_trait;
use pinhole_core::repository::{ReadRepository, Result};
use pinhole_core::{ShortCode, ShortUrlMapping, UrlCache};
use tracing::{debug, trace, warn};

/// A read-only repository decorator that adds read-through caching.
///
/// Reads check the cache first and fall back to the inner repository.
/// Mappings found in the inner repository are written back to the cache;
/// misses are not cached. A failing cache never fails a read: the error is
/// logged and the inner repository answers instead.
#[derive(Debug, Clone)]
pub struct CachedRepository<R, C> {
    inner: R,
    cache: C,
}

impl<R: ReadRepository, C: UrlCache> CachedRepository<R, C> {
    /// Creates a new cached repository decorator.
    ///
    /// # Arguments
    ///
    /// * `inner` - The underlying read-only repository implementation
    /// * `cache` - The cache implementation (e.g. `MokaUrlCache`)
    pub fn new(inner: R, cache: C) -> Self {
        Self { inner, cache }
    }

    /// Returns a reference to the inner repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Returns a reference to the cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    async fn cached(&self, code: &ShortCode) -> Option<ShortUrlMapping> {
        match self.cache.get(code).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(code = %code, error = %e, "Cache error on get, falling back to inner repository");
                None
            }
        }
    }
}

#[async_trait]
impl<R: ReadRepository, C: UrlCache> ReadRepository for CachedRepository<R, C> {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<ShortUrlMapping>> {
        if let Some(mapping) = self.cached(code).await {
            return Ok(Some(mapping));
        }

        trace!(code = %code, "Cache miss, fetching from inner repository");
        let found = self.inner.find_by_code(code).await?;

        if let Some(mapping) = &found {
            match self.cache.put(code, mapping).await {
                Ok(()) => debug!(code = %code, "Populated cache from inner repository"),
                Err(e) => warn!(code = %code, error = %e, "Failed to populate cache"),
            }
        }

        Ok(found)
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        if self.cached(code).await.is_some() {
            debug!(code = %code, "Cache hit indicates code exists");
            return Ok(true);
        }

        self.inner.exists(code).await
    }
}
