use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use pinhole_core::repository::{ReadRepository, Repository, Result};
use pinhole_core::{MappingId, NewShortUrl, ShortCode, ShortUrlMapping, StorageError};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Inserts go through the entry API, so the
/// uniqueness check and the write happen under the same shard lock.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<ShortCode, ShortUrlMapping>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<ShortUrlMapping>> {
        Ok(self.storage.get(code).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn save(&self, mapping: NewShortUrl) -> Result<ShortUrlMapping> {
        match self.storage.entry(mapping.short_code.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(mapping.short_code.to_string())),
            Entry::Vacant(slot) => {
                let id = MappingId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
                let saved = mapping.into_mapping(id);
                trace!(code = %saved.short_code, id = %id, "stored mapping in memory");
                slot.insert(saved.clone());
                Ok(saved)
            }
        }
    }
}
