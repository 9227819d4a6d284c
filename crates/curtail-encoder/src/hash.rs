use async_trait::async_trait;
use curtail_core::alphabet::{Alphabet, BASE};
use curtail_core::error::{EncoderError, Result, StorageError};
use curtail_core::store::CodeStore;
use curtail_core::strategy::EncodingStrategy;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Fixed length of produced codes.
pub const CODE_LENGTH: usize = 8;

/// Collision probe budget before an encode fails.
pub const MAX_RETRIES: u32 = 100;

/// Supplies the symbol mixed into each collision retry.
///
/// Injectable so tests can drive a deterministic probe sequence.
pub trait SymbolSource: Send + Sync + 'static {
    fn next_symbol(&self) -> char;
}

/// Draws uniformly from the code alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSymbolSource;

impl SymbolSource for RandomSymbolSource {
    fn next_symbol(&self) -> char {
        let ordinal = rand::rng().random_range(0..BASE as u8);
        Alphabet::base62().symbol_at(ordinal)
    }
}

/// Configures a hash encoder instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct HashEncoderSettings {
    /// Length every produced code is truncated to, retries included.
    #[builder(default = CODE_LENGTH)]
    pub code_length: usize,
    /// How many re-hash rounds a single encode may spend resolving
    /// collisions before failing with `ExhaustedRetries`.
    #[builder(default = MAX_RETRIES)]
    pub max_retries: u32,
}

impl Default for HashEncoderSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Content-hash encoding strategy.
///
/// The code is the first 8 hex characters of the URL's SHA-256 digest,
/// which needs no shared counter and so suits horizontally distributed
/// encoders. Collisions are resolved by re-hashing the taken candidate
/// salted with a random alphabet symbol and truncating again, so code
/// length stays fixed across retries. The probe is bounded; running out
/// of budget is a fatal capacity condition, not something to retry.
pub struct HashEncoder<S, R = RandomSymbolSource> {
    store: Arc<S>,
    symbols: R,
    settings: HashEncoderSettings,
}

impl<S: CodeStore> HashEncoder<S> {
    /// Creates an encoder with default settings and a thread-local
    /// random symbol source.
    pub fn new(store: S) -> Self {
        Self::with_symbol_source(store, RandomSymbolSource, HashEncoderSettings::default())
    }
}

impl<S: CodeStore, R: SymbolSource> HashEncoder<S, R> {
    /// Creates an encoder with an explicit symbol source and settings.
    pub fn with_symbol_source(store: S, symbols: R, settings: HashEncoderSettings) -> Self {
        Self {
            store: Arc::new(store),
            symbols,
            settings,
        }
    }

    /// SHA-256 of the input, rendered as hex and truncated to the
    /// configured code length.
    fn candidate_for(&self, input: &str) -> String {
        let digest = Sha256::digest(input.as_bytes());
        let mut code = hex::encode(digest);
        code.truncate(self.settings.code_length);
        code
    }
}

#[async_trait]
impl<S: CodeStore, R: SymbolSource> EncodingStrategy for HashEncoder<S, R> {
    async fn encode(&self, url: &str) -> Result<String> {
        let mut candidate = self.candidate_for(url);
        let mut retries = 0;

        loop {
            if self.store.find_by_code(&candidate).await?.is_none() {
                match self.store.insert(&candidate, url).await {
                    Ok(()) => {
                        debug!(code = %candidate, retries, "encoded hashed url");
                        return Ok(candidate);
                    }
                    // A concurrent encode claimed the candidate between
                    // the probe and the insert; costs one retry round
                    // like any other collision.
                    Err(StorageError::Conflict(_)) => {}
                    Err(err) => return Err(err.into()),
                }
            }

            if retries == self.settings.max_retries {
                return Err(EncoderError::ExhaustedRetries {
                    url: url.to_owned(),
                    retries,
                });
            }
            retries += 1;
            warn!(code = %candidate, retries, "short code collision, re-hashing");

            let salt = self.symbols.next_symbol();
            candidate = self.candidate_for(&format!("{}{}", candidate, salt));
        }
    }

    async fn decode(&self, code: &str) -> Result<Option<String>> {
        // Lookup is by exact string match; alphabet membership is
        // never checked here.
        Ok(self.store.find_by_code(code).await?.map(|record| record.url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curtail_core::record::HashedUrlRecord;
    use curtail_storage::InMemoryCodeStore;

    /// Always yields the same symbol, making probe sequences
    /// reproducible.
    struct FixedSymbolSource(char);

    impl SymbolSource for FixedSymbolSource {
        fn next_symbol(&self) -> char {
            self.0
        }
    }

    fn sha256_prefix(input: &str) -> String {
        let mut code = hex::encode(Sha256::digest(input.as_bytes()));
        code.truncate(CODE_LENGTH);
        code
    }

    #[tokio::test]
    async fn encode_produces_fixed_length_codes() {
        let encoder = HashEncoder::new(InMemoryCodeStore::new());

        let long_url = format!("https://example.com/{}", "x".repeat(4096));
        for url in ["https://a.io", "https://example.com", long_url.as_str()] {
            let code = encoder.encode(url).await.unwrap();
            assert_eq!(code.len(), CODE_LENGTH);
        }
    }

    #[tokio::test]
    async fn encode_uses_sha256_prefix() {
        let encoder = HashEncoder::new(InMemoryCodeStore::new());

        let code = encoder.encode("https://example.com").await.unwrap();
        assert_eq!(code, sha256_prefix("https://example.com"));
    }

    #[tokio::test]
    async fn encode_retries_on_collision() {
        let store = InMemoryCodeStore::new();
        let first = sha256_prefix("https://collision.test");
        store.insert(&first, "https://old.test").await.unwrap();

        let encoder = HashEncoder::with_symbol_source(
            store,
            FixedSymbolSource('f'),
            HashEncoderSettings::default(),
        );

        let code = encoder.encode("https://collision.test").await.unwrap();

        assert_ne!(code, first);
        assert_eq!(code.len(), CODE_LENGTH);
        // The retry candidate is the salted re-hash of the taken one.
        assert_eq!(code, sha256_prefix(&format!("{}f", first)));
        assert_eq!(
            encoder.decode(&code).await.unwrap().as_deref(),
            Some("https://collision.test")
        );
    }

    /// Store whose code space is full: every probe hits an existing
    /// record.
    struct SaturatedStore;

    #[async_trait]
    impl CodeStore for SaturatedStore {
        async fn insert(&self, code: &str, _url: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Conflict(code.to_owned()))
        }

        async fn find_by_code(
            &self,
            code: &str,
        ) -> std::result::Result<Option<HashedUrlRecord>, StorageError> {
            Ok(Some(HashedUrlRecord {
                code: code.to_owned(),
                url: "https://taken.test".to_string(),
            }))
        }
    }

    #[tokio::test]
    async fn encode_fails_when_retries_exhausted() {
        let encoder = HashEncoder::with_symbol_source(
            SaturatedStore,
            FixedSymbolSource('a'),
            HashEncoderSettings::default(),
        );

        let err = encoder.encode("https://example.com").await.unwrap_err();

        match err {
            EncoderError::ExhaustedRetries { url, retries } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(retries, MAX_RETRIES);
            }
            other => panic!("expected ExhaustedRetries, got {:?}", other),
        }
    }

    /// Store where the probe misses but the first insert loses a race.
    struct RacyStore {
        inner: InMemoryCodeStore,
        stolen: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl CodeStore for RacyStore {
        async fn insert(&self, code: &str, url: &str) -> std::result::Result<(), StorageError> {
            if !self.stolen.swap(true, std::sync::atomic::Ordering::SeqCst) {
                // A concurrent writer lands the candidate first.
                self.inner.insert(code, "https://thief.test").await?;
                return Err(StorageError::Conflict(code.to_owned()));
            }
            self.inner.insert(code, url).await
        }

        async fn find_by_code(
            &self,
            code: &str,
        ) -> std::result::Result<Option<HashedUrlRecord>, StorageError> {
            self.inner.find_by_code(code).await
        }
    }

    #[tokio::test]
    async fn encode_survives_losing_the_insert_race() {
        let encoder = HashEncoder::with_symbol_source(
            RacyStore {
                inner: InMemoryCodeStore::new(),
                stolen: std::sync::atomic::AtomicBool::new(false),
            },
            FixedSymbolSource('b'),
            HashEncoderSettings::default(),
        );

        let code = encoder.encode("https://example.com").await.unwrap();

        assert_eq!(code.len(), CODE_LENGTH);
        assert_ne!(code, sha256_prefix("https://example.com"));
        assert_eq!(
            encoder.decode(&code).await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn decode_returns_original_url() {
        let store = InMemoryCodeStore::new();
        store.insert("abcdef12", "https://found.test").await.unwrap();

        let encoder = HashEncoder::new(store);

        let url = encoder.decode("abcdef12").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://found.test"));
    }

    #[tokio::test]
    async fn decode_unknown_code_is_not_found() {
        let encoder = HashEncoder::new(InMemoryCodeStore::new());

        assert!(encoder.decode("notfound").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn decode_never_validates_alphabet_membership() {
        let store = InMemoryCodeStore::new();
        store.insert("code-with-$", "https://odd.test").await.unwrap();

        let encoder = HashEncoder::new(store);

        // Exact-match lookup; foreign characters are not an error here.
        assert_eq!(
            encoder.decode("code-with-$").await.unwrap().as_deref(),
            Some("https://odd.test")
        );
        assert!(encoder.decode("also$odd").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn encode_decode_round_trip() {
        let encoder = HashEncoder::new(InMemoryCodeStore::new());

        for url in ["https://example.com", "https://neaturl.example/test"] {
            let code = encoder.encode(url).await.unwrap();
            assert_eq!(encoder.decode(&code).await.unwrap().as_deref(), Some(url));
        }
    }
}
