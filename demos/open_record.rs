//! Build, encode and decode open-schema records in both extension modes.
//!
//! Run with: RUST_LOG=watson_sdk=debug cargo run --example open_record

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use watson_sdk::{known_fields, CodecOptions, DynamicRecord, RecordCodec, TypedRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Foo {
    bar: String,
    fum: String,
    ack: bool,
}

known_fields! {
    #[derive(Debug, Clone)]
    struct TestFields {
        "prop1" => prop1: String,
        "prop2" => prop2: i64,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut typed = TypedRecord::<TestFields, Foo>::with_known(TestFields {
        prop1: Some("string".into()),
        prop2: Some(42),
    });
    typed.add(
        "myFoo",
        Foo {
            bar: "bar".into(),
            fum: "fum".into(),
            ack: false,
        },
    )?;
    println!("typed:   {}", typed.to_json_string()?);

    let codec = RecordCodec::new(CodecOptions::from_env()?);
    let dynamic: DynamicRecord<TestFields> = codec.decode_str(
        r#"{"prop1":"string","prop2":42,"myFoo":{"bar":"bar","fum":"fum","ack":false},"baz":"baz","qux":1.23}"#,
    )?;
    for (key, value) in dynamic.iter() {
        println!("{key:>6} [{}] {value}", value.kind());
    }
    println!("dynamic: {}", codec.encode_to_string(&dynamic)?);

    Ok(())
}
