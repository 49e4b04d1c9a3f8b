use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shortbloom_core::repository::{Repository, Result};
use shortbloom_core::{ShortCode, StorageError};
use tracing::trace;

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, String>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
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

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        Ok(self.storage.get(code.as_str()).map(|url| url.value().clone()))
    }

    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        self.storage.insert(code.as_str().to_owned(), url.to_owned());
        Ok(())
    }

    async fn insert(&self, code: &ShortCode, url: &str) -> Result<()> {
        // The entry API holds the shard lock across check and insert.
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => {
                trace!(code = %code, "short code already taken in memory");
                Err(StorageError::Conflict(code.to_string()))
            }
            Entry::Vacant(slot) => {
                slot.insert(url.to_owned());
                Ok(())
            }
        }
    }
}
