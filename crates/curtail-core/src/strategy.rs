use crate::error::Result;
use async_trait::async_trait;

/// Capability shared by the interchangeable encoding strategies.
///
/// Implementations are synchronous units of work that may await their
/// backing store; they hold no cache and no state across calls, so a
/// caller may invoke them concurrently.
#[async_trait]
pub trait EncodingStrategy: Send + Sync + 'static {
    /// Shortens a URL and returns the code it can be resolved by.
    async fn encode(&self, url: &str) -> Result<String>;

    /// Resolves a code back to its original URL.
    ///
    /// Returns `Ok(None)` for a well-formed code with no record behind
    /// it; that is a normal outcome, not an error.
    async fn decode(&self, code: &str) -> Result<Option<String>>;
}
