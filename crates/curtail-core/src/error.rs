use thiserror::Error;

/// Result type for encoder operations.
pub type Result<T> = std::result::Result<T, EncoderError>;

/// Failures surfaced by the store collaborator contracts.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("key already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// The encoder error taxonomy.
///
/// A well-formed code with no record behind it is not an error; both
/// strategies report it as `Ok(None)` from `decode`. The two fatal
/// variants are not retryable without external intervention.
#[derive(Debug, Clone, Error)]
pub enum EncoderError {
    /// Decode input contains a character outside the 62-symbol
    /// alphabet, or does not parse as an identifier at all.
    #[error("invalid encoded input: {0}")]
    InvalidEncodedInput(String),
    /// A freshly encoded URL failed to resolve back to itself.
    /// Signals a store-level anomaly such as identifier reuse.
    #[error("encoded url failed to round-trip: {0}")]
    EncodingInconsistency(String),
    /// Collision probing ran out of budget without finding a free code.
    #[error("exhausted {retries} collision retries encoding url: {url}")]
    ExhaustedRetries { url: String, retries: u32 },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
