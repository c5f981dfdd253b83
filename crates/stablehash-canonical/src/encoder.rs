//! Canonical token encoder.
//!
//! Every value is framed as `<type-name>=<payload>;`, records as
//! `{name=value,...}` in declaration order, sequences as `[value,...]` in
//! element order, and maps as `{key=value,...}` with entries sorted by the
//! byte order of their encoded keys. The `;` terminator makes the stream
//! self-delimiting without length prefixes.

use std::io;

use crate::record::Record;
use crate::sink::Sink;
use crate::value::Value;

/// Error raised while encoding a value.
///
/// Generic structural encoding never fails on its own; the intrinsic
/// failure sources are the self-describing hook and the sink. Each
/// recursive level wraps a child failure with its own structural context,
/// producing a breadcrumb trail from the root to the failure site.
#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    /// A self-describing value's [`EncodeSelf`](crate::EncodeSelf) hook
    /// reported failure.
    #[error("custom encoder for {type_name} failed: {source}")]
    CustomEncodeFailed {
        /// Type name of the value whose hook failed.
        type_name: String,
        /// Failure reported by the hook.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The underlying byte sink rejected a write.
    #[error("sink write failed: {0}")]
    SinkWrite(#[from] io::Error),
    /// A child value failed to encode; `location` names the container kind
    /// and field name or index where the failure occurred.
    #[error("encoding {location}: {source}")]
    Context {
        /// Structural position of the failing child.
        location: String,
        /// Underlying failure.
        #[source]
        source: Box<EncodeError>,
    },
}

impl EncodeError {
    fn context(self, location: String) -> EncodeError {
        EncodeError::Context {
            location,
            source: Box::new(self),
        }
    }
}

/// Encodes `value` into a fresh buffer and returns the canonical bytes.
pub fn canonical_bytes(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf)?;
    Ok(buf)
}

/// Writes the full canonical frame of `value` to `sink`.
///
/// For self-describing values the custom hook runs first and its output is
/// written ahead of the structural frame; both end up in the stream.
pub fn encode_value(value: &Value, sink: &mut dyn Sink) -> Result<(), EncodeError> {
    if let Value::Custom(custom) = value {
        custom
            .encoder()
            .encode_self(sink)
            .map_err(|source| EncodeError::CustomEncodeFailed {
                type_name: custom.value().type_name().to_string(),
                source,
            })?;
        return encode_value(custom.value(), sink);
    }

    sink.write(value.type_name().as_bytes())?;
    sink.write(b"=")?;
    encode_payload(value, sink)?;
    sink.write(b";")?;
    Ok(())
}

fn encode_payload(value: &Value, sink: &mut dyn Sink) -> Result<(), EncodeError> {
    match value {
        Value::Record(record) => encode_record(record, sink),
        Value::Array(items) => encode_sequence("array", items, sink),
        Value::Slice(items) => encode_sequence("slice", items, sink),
        Value::Map(entries) => encode_map(entries, sink),
        Value::Ref(None) => Ok(sink.write(b"nil")?),
        Value::Ref(Some(inner)) => encode_value(inner, sink)
            .map_err(|source| source.context("referenced value".to_string())),
        Value::Any(inner) => {
            encode_value(inner, sink).map_err(|source| source.context("boxed value".to_string()))
        }
        Value::Bool(v) => Ok(sink.write(if *v { b"true" } else { b"false" })?),
        Value::Uint(v) => Ok(sink.write(v.to_string().as_bytes())?),
        Value::Int(v) => Ok(sink.write(v.to_string().as_bytes())?),
        Value::Float(v) => Ok(sink.write(format!("{v:e}").as_bytes())?),
        Value::Str(v) => {
            sink.write(b"\"")?;
            sink.write(v.as_bytes())?;
            Ok(sink.write(b"\"")?)
        }
        Value::Func => Ok(sink.write(b"func()")?),
        Value::Chan => Ok(sink.write(b"chan")?),
        // Tag-only frame: nothing to introspect, nothing to emit.
        Value::Opaque(_) => Ok(()),
        // encode_value unwraps self-describing layers before opening the
        // frame, so no Custom value can reach the payload stage.
        Value::Custom(_) => unreachable!("custom values are unwrapped in encode_value"),
    }
}

fn encode_record(record: &Record, sink: &mut dyn Sink) -> Result<(), EncodeError> {
    sink.write(b"{")?;
    let mut first = true;
    for (index, field) in record.fields().iter().enumerate() {
        if field.meta().is_skipped() {
            continue;
        }
        if !first {
            sink.write(b",")?;
        }
        first = false;

        sink.write(field.effective_name().as_bytes())?;
        sink.write(b"=")?;
        encode_value(field.value(), sink).map_err(|source| {
            source.context(format!(
                "struct {} field [{}]{}",
                record.name(),
                index,
                field.name()
            ))
        })?;
    }
    sink.write(b"}")?;
    Ok(())
}

fn encode_sequence(kind: &str, items: &[Value], sink: &mut dyn Sink) -> Result<(), EncodeError> {
    sink.write(b"[")?;
    for (index, item) in items.iter().enumerate() {
        if index != 0 {
            sink.write(b",")?;
        }
        encode_value(item, sink)
            .map_err(|source| source.context(format!("{kind} index {index}")))?;
    }
    sink.write(b"]")?;
    Ok(())
}

fn encode_map(entries: &[(Value, Value)], sink: &mut dyn Sink) -> Result<(), EncodeError> {
    // Keys are encoded into temporary buffers first so entries can be
    // ordered by their encoded representation rather than by whatever
    // order the caller inserted them in.
    let mut encoded: Vec<(Vec<u8>, &Value)> = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let mut buf = Vec::new();
        encode_value(key, &mut buf).map_err(|source| source.context("map key".to_string()))?;
        encoded.push((buf, value));
    }
    // Stable sort: keys with identical encodings keep insertion order.
    encoded.sort_by(|a, b| a.0.cmp(&b.0));

    sink.write(b"{")?;
    for (index, (key, value)) in encoded.iter().enumerate() {
        if index != 0 {
            sink.write(b",")?;
        }
        sink.write(key)?;
        sink.write(b"=")?;
        encode_value(value, sink).map_err(|source| source.context("map value".to_string()))?;
    }
    sink.write(b"}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(value: &Value) -> String {
        String::from_utf8(canonical_bytes(value).unwrap()).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(bytes(&Value::Bool(false)), "bool=false;");
        assert_eq!(bytes(&Value::Uint(42)), "uint64=42;");
        assert_eq!(bytes(&Value::Int(-7)), "int64=-7;");
        assert_eq!(bytes(&Value::Str("a\"b".into())), "string=\"a\"b\";");
    }

    #[test]
    fn float_uses_scientific_notation() {
        assert_eq!(bytes(&Value::Float(1.5)), "float64=1.5e0;");
        assert_eq!(bytes(&Value::Float(-100.0)), "float64=-1e2;");
    }

    #[test]
    fn nil_and_present_references() {
        assert_eq!(bytes(&Value::nil()), "=nil;");
        assert_eq!(bytes(&Value::reference(true)), "=bool=true;;");
    }

    #[test]
    fn boxed_value_unwraps_transparently() {
        assert_eq!(bytes(&Value::boxed(1u8)), "=uint64=1;;");
    }

    #[test]
    fn sentinels_and_opaque() {
        assert_eq!(bytes(&Value::Func), "=func();");
        assert_eq!(bytes(&Value::Chan), "=chan;");
        assert_eq!(bytes(&Value::Opaque("Handle".into())), "Handle=;");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(bytes(&Value::Array(vec![])), "=[];");
        assert_eq!(bytes(&Value::Slice(vec![])), "=[];");
        assert_eq!(bytes(&Value::Map(vec![])), "={};");
    }

    #[test]
    fn sequences_preserve_order() {
        assert_eq!(
            bytes(&Value::Slice(vec![Value::Uint(2), Value::Uint(1)])),
            "=[uint64=2;,uint64=1;];"
        );
    }

    #[test]
    fn map_entries_sort_by_encoded_key_bytes() {
        let value = Value::map([(2u64, "b"), (10u64, "c"), (1u64, "a")]);
        // Byte order over the full encoded key, terminator included:
        // "uint64=10;" sorts before "uint64=1;" because '0' < ';'.
        assert_eq!(
            bytes(&value),
            "={uint64=10;=string=\"c\";,uint64=1;=string=\"a\";,uint64=2;=string=\"b\";};"
        );
    }

    #[test]
    fn colliding_map_keys_keep_insertion_order() {
        let value = Value::Map(vec![
            (Value::Uint(1), Value::Str("first".into())),
            (Value::Uint(1), Value::Str("second".into())),
        ]);
        assert_eq!(
            bytes(&value),
            "={uint64=1;=string=\"first\";,uint64=1;=string=\"second\";};"
        );
    }
}
