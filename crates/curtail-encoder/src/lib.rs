//! Encoder implementations for the Curtail URL shortener.
//!
//! Two interchangeable strategies implement the
//! [`EncodingStrategy`](curtail_core::EncodingStrategy) capability:
//! a sequential Base62 encoder backed by store-assigned identifiers,
//! and a content-hash encoder with bounded collision probing. Both own
//! their persistence mapping through the store contracts in
//! `curtail-core` and can coexist since their key spaces are disjoint.

pub mod base62;
pub mod hash;

pub use base62::Base62Encoder;
pub use hash::{
    HashEncoder, HashEncoderSettings, RandomSymbolSource, SymbolSource, CODE_LENGTH, MAX_RETRIES,
};
