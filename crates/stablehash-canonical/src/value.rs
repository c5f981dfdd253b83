use crate::record::{CustomValue, EncodeSelf, Record};

/// Closed variant tree over every encodable kind.
///
/// A `Value` is read-only input to the encoder; it owns its children, so
/// cyclic structures are unrepresentable and encoding depth always equals
/// tree depth.
#[derive(Debug)]
pub enum Value {
    /// Boolean, emitted as `true`/`false`.
    Bool(bool),
    /// Unsigned integer, emitted in base 10.
    Uint(u64),
    /// Signed integer, emitted in base 10 with sign when negative.
    Int(i64),
    /// 64-bit float, emitted as shortest round-trippable scientific notation.
    Float(f64),
    /// Text, emitted double-quoted without escaping.
    Str(String),
    /// Struct-like value with named fields; see [`Record`].
    Record(Record),
    /// Fixed-length sequence; element order is semantically meaningful.
    Array(Vec<Value>),
    /// Variable-length sequence; element order is semantically meaningful.
    Slice(Vec<Value>),
    /// Insertion-ordered key/value association list.
    ///
    /// Entries are re-ordered by the byte order of their encoded keys
    /// before emission, so insertion order never leaks into the stream.
    /// Two distinct keys that encode to identical bytes are accepted
    /// silently and keep their insertion order; callers that need the
    /// stream to distinguish them must use distinguishable keys.
    Map(Vec<(Value, Value)>),
    /// Optional reference: `None` encodes as the literal `nil`, `Some`
    /// recurses into the referenced value.
    Ref(Option<Box<Value>>),
    /// Boxed dynamic value; unwrapped and encoded transparently.
    Any(Box<Value>),
    /// Opaque callable, emitted as the sentinel `func()`.
    Func,
    /// Opaque channel or handle, emitted as the sentinel `chan`.
    Chan,
    /// Non-introspectable value of the named type; encodes as its type tag
    /// with no payload rather than failing.
    Opaque(String),
    /// Self-describing value; see [`CustomValue`].
    Custom(CustomValue),
}

impl Value {
    /// Type name written as the `<type-name>=` tag of this value's frame.
    ///
    /// Scalars carry fixed names, records their declared name, and
    /// composite kinds an empty name (they are unnamed types).
    pub fn type_name(&self) -> &str {
        match self {
            Value::Bool(_) => "bool",
            Value::Uint(_) => "uint64",
            Value::Int(_) => "int64",
            Value::Float(_) => "float64",
            Value::Str(_) => "string",
            Value::Record(record) => record.name(),
            Value::Opaque(name) => name,
            Value::Custom(custom) => custom.value().type_name(),
            Value::Array(_)
            | Value::Slice(_)
            | Value::Map(_)
            | Value::Ref(_)
            | Value::Any(_)
            | Value::Func
            | Value::Chan => "",
        }
    }

    /// An absent optional reference.
    pub fn nil() -> Value {
        Value::Ref(None)
    }

    /// A present optional reference to `value`.
    pub fn reference(value: impl Into<Value>) -> Value {
        Value::Ref(Some(Box::new(value.into())))
    }

    /// A boxed dynamic value holding `value`.
    pub fn boxed(value: impl Into<Value>) -> Value {
        Value::Any(Box::new(value.into()))
    }

    /// A fixed-length sequence of the given elements.
    pub fn array<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Value {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// An association list built from the given entries, keeping insertion
    /// order for tie-breaking.
    pub fn map<K: Into<Value>, V: Into<Value>>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Value {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// A self-describing value: `encoder` runs first, then `value` is
    /// encoded structurally.
    pub fn custom(encoder: impl EncodeSelf + 'static, value: Value) -> Value {
        Value::Custom(CustomValue::new(encoder, value))
    }

    /// Converts a JSON document into the variant tree.
    ///
    /// `null` maps to an absent reference, objects to association lists
    /// with string keys, and numbers to the narrowest of
    /// `Uint`/`Int`/`Float` that holds them.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Ref(None),
            serde_json::Value::Bool(v) => Value::Bool(*v),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Opaque("number".to_string())
                }
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Slice(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (Value::Str(k.clone()), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Returns true for an absent optional reference.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Ref(None))
    }

    /// Returns true for a record.
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns true for an association list.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns true for either sequence kind.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Slice(_))
    }

    /// Borrows the text payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows the record, if this is a `Record`.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Slice(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::Ref(v.map(|inner| Box::new(inner.into())))
    }
}

macro_rules! from_uint {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Uint(u64::from(v))
            }
        })*
    };
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

from_uint!(u8, u16, u32, u64);
from_int!(i8, i16, i32, i64);
