//! In-memory reference implementations of the Curtail store contracts.
//!
//! These back the encoder test suites and embedders that do not bring
//! their own persistence. Durable backends implement the same traits
//! against a relational table or ordered key-value store.

pub mod memory;

pub use memory::{InMemoryCodeStore, InMemorySequenceStore};
