//! Core types and contracts for the Curtail URL shortener.
//!
//! This crate provides the shared alphabet codec, the error taxonomy,
//! record types, and the store/strategy traits implemented by the
//! encoder and storage crates.

pub mod alphabet;
pub mod error;
pub mod record;
pub mod store;
pub mod strategy;

pub use alphabet::{Alphabet, BASE};
pub use error::{EncoderError, Result, StorageError};
pub use record::{HashedUrlRecord, UrlRecord};
pub use store::{CodeStore, SequenceStore};
pub use strategy::EncodingStrategy;
