use crate::record::{HashedUrlRecord, UrlRecord};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::StorageError>;

/// Store contract for the sequential strategy.
///
/// The store assigns identifiers: 0-based, monotonically increasing,
/// atomic under concurrent inserts, never reused. This is the one hard
/// ordering requirement the encoders depend on.
#[async_trait]
pub trait SequenceStore: Send + Sync + 'static {
    /// Persists a URL and returns the freshly assigned identifier.
    ///
    /// Backends that enforce URL uniqueness return `Err(Conflict)` when
    /// the URL is already present; the encoder then re-reads and reuses
    /// the winning record.
    async fn insert(&self, url: &str) -> Result<u64>;

    /// Retrieves the record with the given identifier, if any.
    async fn find_by_id(&self, id: u64) -> Result<Option<UrlRecord>>;

    /// Retrieves the record holding the given URL, if any.
    /// Used for de-duplication before inserting.
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>>;
}

/// Store contract for the hash strategy: records keyed by the code
/// string itself.
#[async_trait]
pub trait CodeStore: Send + Sync + 'static {
    /// Persists a `(code, url)` pair.
    /// Returns `Err(Conflict)` if the code is already taken.
    async fn insert(&self, code: &str, url: &str) -> Result<()>;

    /// Retrieves the record with the given code, if any.
    async fn find_by_code(&self, code: &str) -> Result<Option<HashedUrlRecord>>;
}
