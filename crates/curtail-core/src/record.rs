use serde::{Deserialize, Serialize};

/// A persisted URL mapping in the sequential strategy's store.
///
/// The identifier is assigned by the store, is unique for the lifetime
/// of the record, and is never reused. Records are never updated or
/// deleted by the encoding subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Store-assigned, monotonically unique identifier.
    pub id: u64,
    /// The original long URL.
    pub url: String,
}

/// A persisted URL mapping in the hash strategy's store.
///
/// The short code itself acts as the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedUrlRecord {
    /// The short code, unique across all records.
    pub code: String,
    /// The original long URL.
    pub url: String,
}
