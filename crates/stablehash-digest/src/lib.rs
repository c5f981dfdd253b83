//! Digest computation over canonical value encodings.
//!
//! This crate layers hashing on top of `stablehash-canonical`: a value is
//! encoded into its deterministic token stream, which is fed directly into
//! a digest accumulator. Identical logical values therefore always yield
//! identical digests; the choice of algorithm only decides the digest, not
//! the determinism.
//!
//! The crate only guarantees *encoding* determinism. Collision resistance
//! is the responsibility of the chosen algorithm.
//!
#![deny(missing_docs)]

/// Supported digest algorithms.
pub mod algorithm;
/// Algorithm + hex digest primitives.
pub mod digest;
/// Digest sinks and hashing entry points.
pub mod hashing;
/// Validation helpers for digest text forms.
pub mod validation;

pub use algorithm::DigestAlgorithm;
pub use self::digest::{Digest, DigestError};
pub use hashing::{
    digest_hex, digest_with, hash_into, hash_with, md5, md5_hex, sha1, sha1_hex, sha256,
    sha256_hex, DigestSink,
};
pub use validation::ValidationError;

pub use stablehash_canonical::{canonical_bytes, EncodeError, Value};
