//! # watson-sdk-rust
//!
//! Data-model core of the Watson service clients: open-schema records and the
//! flattening JSON codec behind them.
//!
//! ## Overview
//!
//! Many Watson payloads are JSON objects with a handful of documented fields
//! and an open set of extra keys (conversation contexts, Discovery documents).
//! An [`OpenRecord`] keeps the documented fields in a typed struct and the rest
//! in an ordered extension map, and serializes both as one flat object.
//!
//! ## Key Features
//!
//! - **Typed mode**: [`TypedRecord`] decodes every extension as one declared type
//! - **Untyped mode**: [`DynamicRecord`] decodes extensions by JSON kind into [`Dynamic`]
//! - **Compile-time schemas**: [`known_fields!`] declares known fields and their wire names
//! - **Configurable leniency**: [`CodecOptions`] from code, environment or YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use watson_sdk::{known_fields, TypedRecord};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Foo {
//!     bar: String,
//!     fum: String,
//!     ack: bool,
//! }
//!
//! known_fields! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     struct TestFields {
//!         "prop1" => prop1: String,
//!         "prop2" => prop2: i64,
//!     }
//! }
//!
//! fn main() -> watson_sdk::Result<()> {
//!     let mut record = TypedRecord::<TestFields, Foo>::new();
//!     record.known.prop1 = Some("string".into());
//!     record.add("myFoo", Foo { bar: "bar".into(), fum: "fum".into(), ack: false })?;
//!
//!     let json = record.to_json_string()?;
//!     assert_eq!(
//!         json,
//!         r#"{"prop1":"string","myFoo":{"bar":"bar","fum":"fum","ack":false}}"#
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`record`] | Open-schema records, dynamic values and the flattening codec |
//! | [`config`] | Codec options |
//! | [`models`] | Conversation and Discovery payload models |
//! | [`error`] | Unified error type |

pub mod config;
pub mod models;
pub mod record;

pub use config::CodecOptions;
pub use record::{
    Dynamic, DynamicKind, DynamicObject, DynamicRecord, KnownFields, OpenRecord, RecordCodec,
    RecordError, TypedRecord,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
