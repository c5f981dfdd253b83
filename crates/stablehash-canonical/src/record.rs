use std::error::Error;
use std::fmt;

use crate::sink::Sink;
use crate::value::Value;

/// Out-of-band metadata attached to a record field.
///
/// Plays the role of a schema annotation: it can rename the field in the
/// token stream or exclude it from encoding entirely. Metadata is part of
/// the record descriptor, never of the runtime value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    rename: Option<String>,
    skip: bool,
}

impl FieldMeta {
    /// Metadata with no overrides; the declared field name is used.
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata that renames the field in the token stream.
    pub fn renamed(name: impl Into<String>) -> Self {
        Self {
            rename: Some(name.into()),
            skip: false,
        }
    }

    /// Metadata that excludes the field from encoding entirely.
    pub fn skipped() -> Self {
        Self {
            rename: None,
            skip: true,
        }
    }

    /// Override name, if any.
    pub fn rename(&self) -> Option<&str> {
        self.rename.as_deref()
    }

    /// Whether the field is excluded from encoding.
    pub fn is_skipped(&self) -> bool {
        self.skip
    }
}

/// A named field of a [`Record`]: declared name, value, and metadata.
#[derive(Debug)]
pub struct Field {
    name: String,
    value: Value,
    meta: FieldMeta,
}

impl Field {
    /// Declared field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Field metadata.
    pub fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    /// Name used in the token stream: the metadata override if present,
    /// else the declared name.
    pub fn effective_name(&self) -> &str {
        self.meta.rename().unwrap_or(&self.name)
    }
}

/// A struct-like value: a type name plus named fields in declaration order.
#[derive(Debug, Default)]
pub struct Record {
    name: String,
    fields: Vec<Field>,
}

impl Record {
    /// Creates an empty record with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field with default metadata.
    pub fn field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.field_with(name, value, FieldMeta::new())
    }

    /// Appends a field with explicit metadata.
    pub fn field_with(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        meta: FieldMeta,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            meta,
        });
        self
    }

    /// Declared type name of the record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Error type reported by a [`EncodeSelf`] implementation.
pub type SelfEncodeError = Box<dyn Error + Send + Sync>;

/// Capability for values that supply their own canonical representation.
///
/// The hook runs before the generic structural encoding of the wrapped
/// value, and its output is *prepended* to the structural frame, not
/// substituted for it. Both byte sequences end up in the stream; see
/// [`CustomValue`].
pub trait EncodeSelf {
    /// Writes this value's custom representation to `sink`.
    ///
    /// Returning an error aborts the whole encode; it is surfaced as
    /// [`EncodeError::CustomEncodeFailed`](crate::EncodeError).
    fn encode_self(&self, sink: &mut dyn Sink) -> Result<(), SelfEncodeError>;
}

/// A self-describing value: an [`EncodeSelf`] hook paired with the
/// structural view that generic encoding still walks afterwards.
pub struct CustomValue {
    encoder: Box<dyn EncodeSelf>,
    value: Box<Value>,
}

impl CustomValue {
    /// Pairs a custom encoder with the structural view of the value.
    pub fn new(encoder: impl EncodeSelf + 'static, value: Value) -> Self {
        Self {
            encoder: Box::new(encoder),
            value: Box::new(value),
        }
    }

    /// The custom encoder hook.
    pub fn encoder(&self) -> &dyn EncodeSelf {
        self.encoder.as_ref()
    }

    /// The structural view encoded after the hook output.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValue")
            .field("type_name", &self.value.type_name())
            .finish_non_exhaustive()
    }
}
