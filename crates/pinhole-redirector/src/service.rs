use std::sync::Arc;

use crate::redirector::Redirector;
use crate::{RedirectorError, Result};
use async_trait::async_trait;
use pinhole_core::{ReadRepository, ShortCode, ShortUrlMapping};
use tracing::{debug, trace};

/// Service for handling URL redirects.
///
/// Uses a read-only repository (usually a [`CachedRepository`]) to look up
/// mappings.
///
/// [`CachedRepository`]: crate::CachedRepository
#[derive(Debug, Clone)]
pub struct RedirectorService<R> {
    repository: Arc<R>,
}

impl<R: ReadRepository> RedirectorService<R> {
    /// Creates a new RedirectorService with the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Resolves a short code to its mapping.
    ///
    /// # Returns
    ///
    /// * `Ok(mapping)` - The stored mapping
    /// * `Err(RedirectorError::NotFound)` - If the code doesn't exist
    /// * `Err(RedirectorError::Storage)` - If the repository failed
    pub async fn resolve(&self, code: &ShortCode) -> Result<ShortUrlMapping> {
        Redirector::resolve(self, code).await
    }
}

#[async_trait]
impl<R: ReadRepository> Redirector for RedirectorService<R> {
    async fn resolve(&self, code: &ShortCode) -> Result<ShortUrlMapping> {
        trace!(code = %code, "resolving short code");

        match self.repository.find_by_code(code).await? {
            Some(mapping) => {
                debug!(code = %code, url = %mapping.long_url, "Resolved short code");
                Ok(mapping)
            }
            None => {
                trace!(code = %code, "Short code not found");
                Err(RedirectorError::NotFound(code.to_string()))
            }
        }
    }
}
