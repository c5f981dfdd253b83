use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::algorithm::DigestAlgorithm;
use crate::validation::ValidationError;
use stablehash_canonical::Value;

/// Algorithm + digest bytes, carried as lowercase hex text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    /// Digest algorithm that produced the bytes.
    pub alg: DigestAlgorithm,
    /// Lowercase hex encoding of the digest bytes.
    pub hex: String,
}

impl Digest {
    /// Constructs a validated digest from its hex text form.
    pub fn new(alg: DigestAlgorithm, hex: impl Into<String>) -> Result<Self, ValidationError> {
        let hex = hex.into();
        let re = Regex::new(r"^[0-9a-f]*$").expect("invalid regex");
        if !re.is_match(&hex) {
            return Err(ValidationError::PatternMismatch {
                field: "digest",
                value: hex,
            });
        }
        let expected = alg.digest_len() * 2;
        if hex.len() != expected {
            return Err(ValidationError::LengthMismatch {
                field: "digest",
                expected,
                actual: hex.len(),
            });
        }
        Ok(Digest { alg, hex })
    }

    /// Constructs a digest from raw bytes, hex-encoding them.
    pub fn from_bytes(alg: DigestAlgorithm, bytes: &[u8]) -> Result<Self, ValidationError> {
        Digest::new(alg, hex::encode(bytes))
    }

    /// Encodes `value` canonically and digests the bytes with `alg`.
    pub fn compute(value: &Value, alg: DigestAlgorithm) -> Result<Self, DigestError> {
        let bytes = crate::hashing::digest_with(value, alg)?;
        Ok(Digest::from_bytes(alg, &bytes)?)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.alg, self.hex)
    }
}

/// Error during digest computation.
#[derive(thiserror::Error, Debug)]
pub enum DigestError {
    /// Canonical encoding failed.
    #[error("canonical encoding failed: {0}")]
    Encode(#[from] stablehash_canonical::EncodeError),
    /// Digest construction failed.
    #[error("digest construction failed: {0}")]
    Validation(#[from] ValidationError),
}
