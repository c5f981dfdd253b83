//! Deterministic canonical encoding of structured values.
//!
//! This crate walks a [`Value`] tree and writes a self-delimiting token
//! stream to a [`Sink`]. The same logical value always produces the same
//! bytes, regardless of the order in which map entries were inserted, which
//! makes the stream suitable as input to a digest function.
//!
//! Core invariants:
//! - Every value is framed as `<type-name>=<payload>;` at every depth.
//! - Map entries are re-ordered by the byte order of their encoded keys
//!   before emission; sequence order is preserved as-is.
//! - Encoding never mutates the input and keeps no state between calls.
//!
//! The stream is a hash-stability format, not an interchange format:
//! strings are emitted without escaping, so the bytes are not guaranteed to
//! parse back unambiguously.
//!
//! ```
//! use stablehash_canonical::{canonical_bytes, Value};
//!
//! let bytes = canonical_bytes(&Value::Bool(true))?;
//! assert_eq!(bytes, b"bool=true;");
//! # Ok::<(), stablehash_canonical::EncodeError>(())
//! ```
//!
#![deny(missing_docs)]

/// Canonical token encoder and encode errors.
pub mod encoder;
/// Record descriptors, field metadata, and the self-describing capability.
pub mod record;
/// Byte sink abstraction.
pub mod sink;
/// Closed variant tree of encodable values.
pub mod value;

pub use encoder::{canonical_bytes, encode_value, EncodeError};
pub use record::{CustomValue, EncodeSelf, Field, FieldMeta, Record, SelfEncodeError};
pub use sink::{IoSink, Sink};
pub use value::Value;
