use async_trait::async_trait;
use curtail_core::alphabet::Alphabet;
use curtail_core::error::{EncoderError, Result, StorageError};
use curtail_core::store::SequenceStore;
use curtail_core::strategy::EncodingStrategy;
use std::sync::Arc;
use tracing::debug;

/// Sequential Base62 encoding strategy.
///
/// Encodes a URL as the base-62 rendition of a store-assigned numeric
/// identifier. Identical URLs are de-duplicated against the store, so
/// encoding the same URL twice yields the same code.
///
/// Every freshly produced code is decoded back before it is returned;
/// a mismatch means the store violated identifier uniqueness and is
/// surfaced as a fatal [`EncoderError::EncodingInconsistency`].
#[derive(Debug, Clone)]
pub struct Base62Encoder<S> {
    store: Arc<S>,
    alphabet: &'static Alphabet,
}

impl<S: SequenceStore> Base62Encoder<S> {
    /// Creates an encoder over the given sequential store.
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Creates an encoder over a shared store handle.
    pub fn from_arc(store: Arc<S>) -> Self {
        Self {
            store,
            alphabet: Alphabet::base62(),
        }
    }

    /// Resolves the identifier for a URL: reuses an existing record,
    /// otherwise inserts a fresh one.
    ///
    /// The lookup-then-insert pair is not atomic; when the store
    /// enforces URL uniqueness and reports a conflict, the encode lost
    /// a race against a concurrent insert of the same URL, and the
    /// winner's identifier is re-read and reused.
    async fn lookup_or_insert(&self, url: &str) -> Result<u64> {
        if let Some(record) = self.store.find_by_url(url).await? {
            debug!(id = record.id, "reusing existing record for url");
            return Ok(record.id);
        }

        match self.store.insert(url).await {
            Ok(id) => Ok(id),
            Err(StorageError::Conflict(_)) => {
                let record = self.store.find_by_url(url).await?.ok_or_else(|| {
                    EncoderError::EncodingInconsistency(format!(
                        "url reported as duplicate but absent from the store: {}",
                        url
                    ))
                })?;
                Ok(record.id)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<S: SequenceStore> EncodingStrategy for Base62Encoder<S> {
    async fn encode(&self, url: &str) -> Result<String> {
        let id = self.lookup_or_insert(url).await?;
        let code = self.alphabet.encode(id);
        debug!(id, code = %code, "encoded base62 url");

        // The just-produced code must resolve to the exact input;
        // anything else signals identifier reuse in the store.
        match self.decode(&code).await? {
            Some(stored) if stored == url => Ok(code),
            Some(stored) => Err(EncoderError::EncodingInconsistency(format!(
                "code '{}' resolved to '{}' instead of '{}'",
                code, stored, url
            ))),
            None => Err(EncoderError::EncodingInconsistency(format!(
                "code '{}' has no record immediately after insert",
                code
            ))),
        }
    }

    async fn decode(&self, code: &str) -> Result<Option<String>> {
        if code.is_empty() {
            return Err(EncoderError::InvalidEncodedInput(
                "code is empty".to_string(),
            ));
        }

        let id = self.alphabet.decode(code)?;
        Ok(self.store.find_by_id(id).await?.map(|record| record.url))
    }
}
