use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Identifier assigned to a mapping by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingId(u64);

impl MappingId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for MappingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mapping that has been fully built but not yet persisted.
///
/// Everything except the id is fixed here, including the creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortUrl {
    pub short_code: ShortCode,
    pub long_url: String,
    pub created_at: Timestamp,
}

impl NewShortUrl {
    /// Builds a new mapping stamped with the current time.
    pub fn new(short_code: ShortCode, long_url: impl Into<String>) -> Self {
        Self {
            short_code,
            long_url: long_url.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Attaches the id assigned by storage.
    pub fn into_mapping(self, id: MappingId) -> ShortUrlMapping {
        ShortUrlMapping {
            id,
            short_code: self.short_code,
            long_url: self.long_url,
            created_at: self.created_at,
        }
    }
}

/// A stored mapping between a short code and the URL it stands for.
///
/// Mappings are never modified once saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortUrlMapping {
    pub id: MappingId,
    pub short_code: ShortCode,
    /// The URL exactly as the caller submitted it.
    pub long_url: String,
    pub created_at: Timestamp,
}

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing the redirector to have read-only access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the mapping for a given short code.
    /// Returns `None` if the code does not exist.
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<ShortUrlMapping>>;

    /// Checks whether a short code already exists in the repository.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Persists a new mapping and returns it with its assigned id.
    ///
    /// Returns `Err(StorageError::Conflict)` if the short code is taken.
    async fn save(&self, mapping: NewShortUrl) -> Result<ShortUrlMapping>;
}

#[async_trait]
impl<T: ReadRepository + ?Sized> ReadRepository for std::sync::Arc<T> {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<ShortUrlMapping>> {
        (**self).find_by_code(code).await
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        (**self).exists(code).await
    }
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for std::sync::Arc<T> {
    async fn save(&self, mapping: NewShortUrl) -> Result<ShortUrlMapping> {
        (**self).save(mapping).await
    }
}
