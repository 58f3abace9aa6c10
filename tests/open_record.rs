//! Integration tests for open-schema records and the flattening codec

use serde::{Deserialize, Serialize};
use watson_sdk::record::{DynamicKind, Untyped};
use watson_sdk::{
    known_fields, CodecOptions, Dynamic, DynamicObject, DynamicRecord, Error, RecordCodec,
    RecordError, TypedRecord,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Foo {
    bar: String,
    fum: String,
    ack: bool,
}

impl Foo {
    fn new(bar: &str, fum: &str, ack: bool) -> Self {
        Self {
            bar: bar.to_string(),
            fum: fum.to_string(),
            ack,
        }
    }
}

known_fields! {
    #[derive(Debug, Clone, PartialEq)]
    struct TestFields {
        "prop1" => prop1: String,
        "prop2" => prop2: i64,
    }
}

fn test_fields() -> TestFields {
    TestFields {
        prop1: Some("string".to_string()),
        prop2: Some(42),
    }
}

const TYPED_JSON: &str = r#"{"prop1":"string","prop2":42,"myFoo":{"bar":"bar","fum":"fum","ack":false},"myFoo2":{"bar":"bar2","fum":"fum2","ack":true}}"#;
const DYNAMIC_JSON: &str = r#"{"prop1":"string","prop2":42,"myFoo":{"bar":"bar","fum":"fum","ack":false},"baz":"baz","qux":1.23}"#;

fn foo_object() -> DynamicObject {
    let mut foo = DynamicObject::new();
    foo.insert("bar".into(), Dynamic::from("bar"));
    foo.insert("fum".into(), Dynamic::from("fum"));
    foo.insert("ack".into(), Dynamic::from(false));
    foo
}

#[test]
fn test_typed_record_encodes_flat() {
    let mut record = TypedRecord::<TestFields, Foo>::with_known(test_fields());
    record.add("myFoo", Foo::new("bar", "fum", false)).unwrap();
    record.add("myFoo2", Foo::new("bar2", "fum2", true)).unwrap();

    assert_eq!(record.to_json_string().unwrap(), TYPED_JSON);
}

#[test]
fn test_typed_record_decodes_flat() {
    let record = TypedRecord::<TestFields, Foo>::from_json_str(TYPED_JSON).unwrap();

    assert_eq!(record.known, test_fields());
    assert_eq!(record.len(), 2);
    assert_eq!(record.get("myFoo"), Some(&Foo::new("bar", "fum", false)));
    assert_eq!(record.get("myFoo2"), Some(&Foo::new("bar2", "fum2", true)));
    assert!(record.get("prop1").is_none());
}

#[test]
fn test_typed_record_rejects_foreign_extension() {
    let err = TypedRecord::<TestFields, Foo>::from_json_str(DYNAMIC_JSON).unwrap_err();
    match err {
        Error::Record(RecordError::ExtensionType { key, .. }) => assert_eq!(key, "baz"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_dynamic_record_encodes_flat() {
    let mut record = DynamicRecord::<TestFields>::with_known(test_fields());
    record.add("myFoo", foo_object()).unwrap();
    record.add("baz", "baz").unwrap();
    record.add("qux", 1.23).unwrap();

    assert_eq!(record.to_json_string().unwrap(), DYNAMIC_JSON);
}

#[test]
fn test_dynamic_record_decodes_by_kind() {
    let record = DynamicRecord::<TestFields>::from_json_str(DYNAMIC_JSON).unwrap();

    assert_eq!(record.known, test_fields());
    let qux = record.get("qux").unwrap();
    assert_eq!(qux.kind(), DynamicKind::Float);
    assert_eq!(qux.as_f64(), Some(1.23));
    assert_eq!(qux.to_string(), "1.23");

    assert_eq!(record.get("baz"), Some(&Dynamic::from("baz")));

    let foo = record.get("myFoo").unwrap();
    assert_eq!(foo.kind(), DynamicKind::Object);
    assert_eq!(foo.as_object(), Some(&foo_object()));
    // The nested object stays nested.
    assert!(!record.contains_key("bar"));
}

#[test]
fn test_encode_decode_is_idempotent() {
    for input in [TYPED_JSON, DYNAMIC_JSON] {
        let record = DynamicRecord::<TestFields>::from_json_str(input).unwrap();
        assert_eq!(record.to_json_string().unwrap(), input);
    }
}

#[test]
fn test_unset_known_fields_are_omitted() {
    let mut record = DynamicRecord::<TestFields>::new();
    record.known.prop2 = Some(42);
    let json = record.to_json_string().unwrap();
    assert_eq!(json, r#"{"prop2":42}"#);
    assert!(!json.contains("null"));
}

#[test]
fn test_record_without_extensions() {
    let record = TypedRecord::<TestFields, Foo>::with_known(test_fields());
    assert_eq!(
        record.to_json_string().unwrap(),
        r#"{"prop1":"string","prop2":42}"#
    );
    assert_eq!(TypedRecord::<TestFields, Foo>::new().to_json_string().unwrap(), "{}");
}

#[test]
fn test_known_field_names_cannot_be_extensions() {
    let mut record = DynamicRecord::<TestFields>::with_known(test_fields());
    let err = record.add("prop2", 7i64).unwrap_err();
    assert_eq!(err, RecordError::ReservedKey { key: "prop2".into() });
    assert_eq!(record.known.prop2, Some(42));

    record.extensions_mut().insert("prop2".into(), Dynamic::from(7i64));
    let err = record.to_json().unwrap_err();
    assert!(matches!(err, Error::Record(RecordError::KeyCollision { .. })));
}

#[test]
fn test_get_missing_extension_is_not_an_error() {
    let record = DynamicRecord::<TestFields>::from_json_str(DYNAMIC_JSON).unwrap();
    assert!(record.get("nope").is_none());
    assert!(record.get_or_default("nope").is_null());
}

#[test]
fn test_integers_and_fallback_kinds() {
    let record = DynamicRecord::<TestFields>::from_json_str(
        r#"{"count":3,"flag":true,"list":[1,"a"],"big":18446744073709551615,"exp":1e2}"#,
    )
    .unwrap();
    assert_eq!(record.get("count"), Some(&Dynamic::Integer(3)));
    assert_eq!(record.get("flag").and_then(Dynamic::as_bool), Some(true));
    assert_eq!(record.get("list").map(Dynamic::kind), Some(DynamicKind::Other));
    assert_eq!(record.get("big").map(Dynamic::kind), Some(DynamicKind::Other));
    assert_eq!(record.get("exp"), Some(&Dynamic::Float(100.0)));
    assert_eq!(
        record.to_json_string().unwrap(),
        r#"{"count":3,"flag":true,"list":[1,"a"],"big":18446744073709551615,"exp":100.0}"#
    );
}

#[test]
fn test_empty_strings_under_lenient_and_strict_codecs() {
    let input = r#"{"prop1":"","prop2":"","baz":""}"#;

    let lenient: DynamicRecord<TestFields> = RecordCodec::default().decode_str(input).unwrap();
    assert_eq!(lenient.known.prop1, None);
    assert_eq!(lenient.known.prop2, None);
    // Leniency only applies to known fields.
    assert_eq!(lenient.get("baz"), Some(&Dynamic::from("")));

    let strict = RecordCodec::new(CodecOptions::strict());
    let err = strict.decode_str::<TestFields, Untyped>(input).unwrap_err();
    assert!(matches!(err, Error::Record(RecordError::KnownField { .. })));
}

#[test]
fn test_codec_is_shareable_across_threads() {
    let codec = std::sync::Arc::new(RecordCodec::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let codec = codec.clone();
            std::thread::spawn(move || {
                let mut record = DynamicRecord::<TestFields>::new();
                record.add(format!("k{i}"), i as i64).unwrap();
                codec.encode_to_string(&record).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!(r#"{{"k{i}":{i}}}"#));
    }
}
