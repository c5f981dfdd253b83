use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use stablehash_canonical::{
    canonical_bytes, encode_value, EncodeError, EncodeSelf, FieldMeta, IoSink, Record,
    SelfEncodeError, Sink, Value,
};

fn record_under_test() -> Value {
    Record::new("Example")
        .field("Name", "a")
        .field("Tags", vec!["x", "y"])
        .field("Meta", Value::map([(2u64, "b"), (1u64, "a")]))
        .into()
}

#[test]
fn end_to_end_record_places_map_keys_in_encoded_byte_order() {
    let bytes = canonical_bytes(&record_under_test()).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "Example={Name=string=\"a\";,\
         Tags==[string=\"x\";,string=\"y\";];,\
         Meta=={uint64=1;=string=\"a\";,uint64=2;=string=\"b\";};};"
    );
}

#[test]
fn encoding_is_deterministic_across_calls() {
    let value = record_under_test();
    assert_eq!(
        canonical_bytes(&value).unwrap(),
        canonical_bytes(&value).unwrap()
    );
}

#[test]
fn map_insertion_order_does_not_influence_output() {
    let forward = Value::map([(1u64, "a"), (2u64, "b"), (3u64, "c")]);
    let backward = Value::map([(3u64, "c"), (1u64, "a"), (2u64, "b")]);
    assert_eq!(
        canonical_bytes(&forward).unwrap(),
        canonical_bytes(&backward).unwrap()
    );
}

#[test]
fn skipped_field_never_influences_output() {
    let with_secret = |secret: &str| -> Value {
        Record::new("Account")
            .field("Id", 7u64)
            .field_with("Secret", secret, FieldMeta::skipped())
            .into()
    };
    let bytes = canonical_bytes(&with_secret("hunter2")).unwrap();
    assert_eq!(bytes, canonical_bytes(&with_secret("changed")).unwrap());
    assert_eq!(String::from_utf8(bytes).unwrap(), "Account={Id=uint64=7;};");
}

#[test]
fn renamed_field_appears_under_override_name_only() {
    let value: Value = Record::new("User")
        .field_with("DisplayName", "a", FieldMeta::renamed("name"))
        .into();
    let bytes = String::from_utf8(canonical_bytes(&value).unwrap()).unwrap();
    assert_eq!(bytes, "User={name=string=\"a\";};");
    assert!(!bytes.contains("DisplayName"));
}

#[test]
fn nested_optional_fields_encode_nil_literal() {
    let value: Value = Record::new("Node")
        .field("Next", Option::<u64>::None)
        .into();
    assert_eq!(
        String::from_utf8(canonical_bytes(&value).unwrap()).unwrap(),
        "Node={Next==nil;};"
    );
}

struct SpyEncoder {
    called: Arc<AtomicBool>,
}

impl EncodeSelf for SpyEncoder {
    fn encode_self(&self, sink: &mut dyn Sink) -> Result<(), SelfEncodeError> {
        self.called.store(true, Ordering::SeqCst);
        sink.write(b"spy!")?;
        Ok(())
    }
}

#[test]
fn custom_hook_is_invoked_and_its_output_precedes_the_structural_frame() {
    let called = Arc::new(AtomicBool::new(false));
    let value = Value::custom(
        SpyEncoder {
            called: called.clone(),
        },
        Record::new("Spied").field("Flag", true).into(),
    );

    let bytes = String::from_utf8(canonical_bytes(&value).unwrap()).unwrap();
    assert!(called.load(Ordering::SeqCst));
    // Hook output is interleaved with, not a replacement for, the generic
    // structural encoding: both are present in the stream.
    assert_eq!(bytes, "spy!Spied={Flag=bool=true;};");
}

struct TagEncoder(&'static [u8]);

impl EncodeSelf for TagEncoder {
    fn encode_self(&self, sink: &mut dyn Sink) -> Result<(), SelfEncodeError> {
        sink.write(self.0)?;
        Ok(())
    }
}

#[test]
fn nested_custom_hooks_each_run_before_a_single_structural_frame() {
    let value = Value::custom(
        TagEncoder(b"outer!"),
        Value::custom(TagEncoder(b"inner!"), Value::Bool(true)),
    );
    assert_eq!(
        String::from_utf8(canonical_bytes(&value).unwrap()).unwrap(),
        "outer!inner!bool=true;"
    );
}

struct FailingEncoder;

impl EncodeSelf for FailingEncoder {
    fn encode_self(&self, _sink: &mut dyn Sink) -> Result<(), SelfEncodeError> {
        Err("broken hook".into())
    }
}

#[test]
fn hook_failure_carries_breadcrumbs_from_root_to_failure_site() {
    let value: Value = Record::new("Outer")
        .field("Ok", 1u64)
        .field(
            "Inner",
            Value::Slice(vec![Value::custom(FailingEncoder, Value::Bool(true))]),
        )
        .into();

    let err = canonical_bytes(&value).unwrap_err();
    let rendered = format!("{err}");
    assert!(rendered.contains("struct Outer field [1]Inner"), "{rendered}");

    // Walk the chain down to the hook failure.
    let mut cause: &EncodeError = &err;
    while let EncodeError::Context { source, .. } = cause {
        cause = source.as_ref();
    }
    match cause {
        EncodeError::CustomEncodeFailed { type_name, source } => {
            assert_eq!(type_name, "bool");
            assert_eq!(source.to_string(), "broken hook");
        }
        other => panic!("expected CustomEncodeFailed, got {other:?}"),
    }
}

#[test]
fn failed_map_key_is_reported_as_map_key() {
    let value = Value::Map(vec![(
        Value::custom(FailingEncoder, Value::Uint(1)),
        Value::Str("v".into()),
    )]);
    let err = canonical_bytes(&value).unwrap_err();
    assert!(format!("{err}").starts_with("encoding map key"));
}

struct RejectingWriter;

impl io::Write for RejectingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn rejected_sink_write_surfaces_as_sink_write_error() {
    let mut sink = IoSink::new(RejectingWriter);
    let err = encode_value(&Value::Bool(true), &mut sink).unwrap_err();
    assert!(matches!(err, EncodeError::SinkWrite(_)), "{err:?}");
}

#[test]
fn io_sink_passes_bytes_through() {
    let mut sink = IoSink::new(Vec::new());
    encode_value(&Value::Uint(5), &mut sink).unwrap();
    assert_eq!(sink.into_inner(), b"uint64=5;");
}

#[test]
fn json_documents_encode_deterministically() {
    let json: serde_json::Value =
        serde_json::from_str(r#"{"b": 1, "a": {"nested": true}, "list": [1, -2]}"#).unwrap();
    let bytes = String::from_utf8(canonical_bytes(&Value::from_json(&json)).unwrap()).unwrap();
    assert_eq!(
        bytes,
        "={string=\"a\";=={string=\"nested\";=bool=true;};,\
         string=\"b\";=uint64=1;,\
         string=\"list\";==[uint64=1;,int64=-2;];};"
    );
}
