//! Digest sinks and hashing entry points.
//!
//! The canonical token stream is fed straight into a running hasher; no
//! intermediate buffer is kept. [`hash_with`] works for any RustCrypto
//! hasher, [`digest_with`] dispatches over [`DigestAlgorithm`], and the
//! per-algorithm wrappers cover the common cases.
//!
//! ```
//! use stablehash_digest::{digest_hex, DigestAlgorithm, Value};
//!
//! let hex = digest_hex(&Value::Bool(true), DigestAlgorithm::Sha256)?;
//! assert_eq!(hex.len(), 64);
//! # Ok::<(), stablehash_digest::EncodeError>(())
//! ```

use std::io;

use md5::Md5;
use sha1::Sha1;
use sha2::Sha256;

use crate::algorithm::DigestAlgorithm;
use stablehash_canonical::{encode_value, EncodeError, Sink, Value};

/// Sink feeding the token stream into a running digest accumulator.
#[derive(Debug, Default)]
pub struct DigestSink<D: digest::Digest> {
    hasher: D,
}

impl<D: digest::Digest> DigestSink<D> {
    /// Creates a sink over a fresh hasher.
    pub fn new() -> Self {
        Self::from_hasher(D::new())
    }

    /// Creates a sink over an existing hasher, preserving any state the
    /// caller has already fed into it (e.g., a domain separator).
    pub fn from_hasher(hasher: D) -> Self {
        Self { hasher }
    }

    /// Consumes the sink and returns the digest bytes.
    pub fn finalize(self) -> Vec<u8> {
        self.hasher.finalize().to_vec()
    }
}

impl<D: digest::Digest> Sink for DigestSink<D> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.hasher.update(bytes);
        Ok(())
    }
}

/// Encodes `value` canonically into the provided hasher and returns the
/// digest bytes.
///
/// The hasher is taken as-is, so bytes already fed into it (a domain
/// separator, a previous value) are part of the digest input.
pub fn hash_into<D: digest::Digest>(value: &Value, hasher: D) -> Result<Vec<u8>, EncodeError> {
    let mut sink = DigestSink::from_hasher(hasher);
    encode_value(value, &mut sink)?;
    Ok(sink.finalize())
}

/// Encodes `value` canonically and digests the bytes with a fresh hasher
/// of type `D`.
pub fn hash_with<D: digest::Digest>(value: &Value) -> Result<Vec<u8>, EncodeError> {
    hash_into(value, D::new())
}

/// Digests `value`'s canonical encoding with the given algorithm.
pub fn digest_with(value: &Value, alg: DigestAlgorithm) -> Result<Vec<u8>, EncodeError> {
    match alg {
        DigestAlgorithm::Sha1 => hash_with::<Sha1>(value),
        DigestAlgorithm::Sha256 => hash_with::<Sha256>(value),
        DigestAlgorithm::Md5 => hash_with::<Md5>(value),
    }
}

/// Lowercase hex form of [`digest_with`].
pub fn digest_hex(value: &Value, alg: DigestAlgorithm) -> Result<String, EncodeError> {
    Ok(hex::encode(digest_with(value, alg)?))
}

/// SHA-1 digest bytes of `value`'s canonical encoding.
pub fn sha1(value: &Value) -> Result<Vec<u8>, EncodeError> {
    digest_with(value, DigestAlgorithm::Sha1)
}

/// SHA-1 digest of `value`'s canonical encoding as lowercase hex.
pub fn sha1_hex(value: &Value) -> Result<String, EncodeError> {
    digest_hex(value, DigestAlgorithm::Sha1)
}

/// SHA-256 digest bytes of `value`'s canonical encoding.
pub fn sha256(value: &Value) -> Result<Vec<u8>, EncodeError> {
    digest_with(value, DigestAlgorithm::Sha256)
}

/// SHA-256 digest of `value`'s canonical encoding as lowercase hex.
pub fn sha256_hex(value: &Value) -> Result<String, EncodeError> {
    digest_hex(value, DigestAlgorithm::Sha256)
}

/// MD5 digest bytes of `value`'s canonical encoding.
pub fn md5(value: &Value) -> Result<Vec<u8>, EncodeError> {
    digest_with(value, DigestAlgorithm::Md5)
}

/// MD5 digest of `value`'s canonical encoding as lowercase hex.
pub fn md5_hex(value: &Value) -> Result<String, EncodeError> {
    digest_hex(value, DigestAlgorithm::Md5)
}
