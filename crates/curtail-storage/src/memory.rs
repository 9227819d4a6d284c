use async_trait::async_trait;
use curtail_core::record::{HashedUrlRecord, UrlRecord};
use curtail_core::store::{CodeStore, SequenceStore};
use curtail_core::StorageError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

type Result<T> = std::result::Result<T, StorageError>;

/// In-memory implementation of the sequential store using DashMap.
///
/// Identifier assignment is a single atomic counter, so concurrent
/// inserts never receive the same identifier. The URL index is written
/// through the entry API, which makes the uniqueness check behave like
/// a relational unique constraint: the loser of a duplicate insert
/// gets `Conflict` and can re-read the winner's record.
#[derive(Debug, Default)]
pub struct InMemorySequenceStore {
    next_id: AtomicU64,
    by_id: DashMap<u64, String>,
    by_url: DashMap<String, u64>,
}

impl InMemorySequenceStore {
    /// Creates an empty store; the first insert is assigned id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that starts assigning identifiers at `next_id`.
    ///
    /// Useful for tests that need a known identifier, and for resuming
    /// from a snapshot of a durable backend.
    pub fn with_next_id(next_id: u64) -> Self {
        Self {
            next_id: AtomicU64::new(next_id),
            by_id: DashMap::new(),
            by_url: DashMap::new(),
        }
    }
}

#[async_trait]
impl SequenceStore for InMemorySequenceStore {
    async fn insert(&self, url: &str) -> Result<u64> {
        match self.by_url.entry(url.to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(url.to_owned())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                self.by_id.insert(id, url.to_owned());
                slot.insert(id);
                Ok(id)
            }
        }
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<UrlRecord>> {
        Ok(self.by_id.get(&id).map(|url| UrlRecord {
            id,
            url: url.clone(),
        }))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>> {
        Ok(self.by_url.get(url).map(|id| UrlRecord {
            id: *id,
            url: url.to_owned(),
        }))
    }
}

/// In-memory implementation of the code-keyed store using DashMap.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCodeStore {
    storage: DashMap<String, String>,
}

impl InMemoryCodeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CodeStore for InMemoryCodeStore {
    async fn insert(&self, code: &str, url: &str) -> Result<()> {
        match self.storage.entry(code.to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_owned())),
            Entry::Vacant(slot) => {
                slot.insert(url.to_owned());
                Ok(())
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<HashedUrlRecord>> {
        Ok(self.storage.get(code).map(|url| HashedUrlRecord {
            code: code.to_owned(),
            url: url.clone(),
        }))
    }
}
