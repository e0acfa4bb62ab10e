use crate::Result;
use async_trait::async_trait;
use pinhole_core::{ShortCode, ShortUrlMapping};

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code to its stored mapping.
    ///
    /// Returns `Err(RedirectorError::NotFound)` if the code was never issued.
    async fn resolve(&self, code: &ShortCode) -> Result<ShortUrlMapping>;
}
