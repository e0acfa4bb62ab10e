use crate::error::ShortenerError;
use crate::repository::ShortUrlMapping;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone)]
pub struct ShortenParams {
    /// The URL to be shortened, as submitted by the caller.
    pub long_url: String,
}

impl ShortenParams {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
        }
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a new mapping under a freshly generated, unique short code.
    ///
    /// Every call creates a new mapping, even for a URL shortened before.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortUrlMapping>;
}
