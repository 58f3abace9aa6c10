//! Open-schema records.
//!
//! An [`OpenRecord`] is a JSON object with a partially known schema: a
//! statically declared set of known fields plus a bag of extensions. On the
//! wire both live side by side in one flat object:
//!
//! ```
//! use watson_sdk::known_fields;
//! use watson_sdk::record::DynamicRecord;
//!
//! known_fields! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct TestFields {
//!         "prop1" => pub prop1: String,
//!         "prop2" => pub prop2: i64,
//!     }
//! }
//!
//! let mut record = DynamicRecord::<TestFields>::new();
//! record.known.prop1 = Some("string".into());
//! record.known.prop2 = Some(42);
//! record.add("baz", "baz").unwrap();
//! record.add("qux", 1.23).unwrap();
//!
//! let json = record.to_json_string().unwrap();
//! assert_eq!(json, r#"{"prop1":"string","prop2":42,"baz":"baz","qux":1.23}"#);
//!
//! let back = DynamicRecord::<TestFields>::from_json_str(&json).unwrap();
//! assert_eq!(back.get("qux").and_then(|v| v.as_f64()), Some(1.23));
//! ```
//!
//! | Type | Description |
//! |------|-------------|
//! | [`OpenRecord`] | Known fields plus an ordered extension map |
//! | [`TypedRecord`] | Record whose extensions all share one type |
//! | [`DynamicRecord`] | Record whose extensions are [`Dynamic`] values |
//! | [`RecordCodec`] | Flattening encoder/decoder |
//! | [`RecordError`] | Record-level failures |

mod codec;
mod dynamic;
mod error;
mod known;
mod mode;

pub use codec::RecordCodec;
pub use dynamic::{Dynamic, DynamicKind, DynamicObject};
pub use error::RecordError;
pub use known::{KnownFields, NoKnownFields};
pub use mode::{ExtensionMode, Typed, Untyped};

use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Record whose extensions must all deserialize as `V`.
pub type TypedRecord<K, V> = OpenRecord<K, Typed<V>>;

/// Record whose extensions may be strings, numbers, nested objects or any
/// other JSON value.
pub type DynamicRecord<K> = OpenRecord<K, Untyped>;

/// A JSON object with known fields `K` and extensions decoded by mode `M`.
pub struct OpenRecord<K, M: ExtensionMode = Untyped> {
    /// Statically declared fields, set directly.
    pub known: K,
    extensions: IndexMap<String, M::Value>,
    _mode: PhantomData<fn() -> M>,
}

impl<K, M: ExtensionMode> OpenRecord<K, M> {
    /// Empty record with default known fields and no extensions.
    pub fn new() -> Self
    where
        K: Default,
    {
        Self::with_known(K::default())
    }

    /// Record with the given known fields and no extensions.
    pub fn with_known(known: K) -> Self {
        Self::from_parts_unchecked(known, IndexMap::new())
    }

    pub(crate) fn from_parts_unchecked(known: K, extensions: IndexMap<String, M::Value>) -> Self {
        Self {
            known,
            extensions,
            _mode: PhantomData,
        }
    }

    /// The extension under `key`, if present.
    pub fn get(&self, key: &str) -> Option<&M::Value> {
        self.extensions.get(key)
    }

    /// Mutable access to an existing extension.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut M::Value> {
        self.extensions.get_mut(key)
    }

    /// The extension under `key`, or the value type's default when absent.
    pub fn get_or_default(&self, key: &str) -> M::Value
    where
        M::Value: Clone + Default,
    {
        self.extensions.get(key).cloned().unwrap_or_default()
    }

    /// Remove an extension, keeping the order of the others. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<M::Value> {
        self.extensions.shift_remove(key)
    }

    /// Whether an extension named `key` exists. Known fields are not consulted.
    pub fn contains_key(&self, key: &str) -> bool {
        self.extensions.contains_key(key)
    }

    /// Number of extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// True when the record has no extensions.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Extension keys in insertion (or wire) order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.extensions.keys()
    }

    /// Extensions in insertion (or wire) order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &M::Value)> {
        self.extensions.iter()
    }

    /// Read-only view of the extension map.
    pub fn extensions(&self) -> &IndexMap<String, M::Value> {
        &self.extensions
    }

    /// Raw access to the extension map.
    ///
    /// Inserts made here skip the reserved and duplicate key checks of
    /// [`add`](Self::add); a reserved key inserted this way makes encoding
    /// fail with [`RecordError::KeyCollision`].
    pub fn extensions_mut(&mut self) -> &mut IndexMap<String, M::Value> {
        &mut self.extensions
    }

    /// Split the record into its known fields and extension map.
    pub fn into_parts(self) -> (K, IndexMap<String, M::Value>) {
        (self.known, self.extensions)
    }
}

impl<K: KnownFields, M: ExtensionMode> OpenRecord<K, M> {
    /// Add an extension.
    ///
    /// Fails with [`RecordError::ReservedKey`] when `key` is a known field
    /// name and with [`RecordError::DuplicateKey`] when it is already present.
    pub fn add(
        &mut self,
        key: impl Into<String>,
        value: impl Into<M::Value>,
    ) -> std::result::Result<(), RecordError> {
        let key = key.into();
        if K::is_reserved(&key) {
            return Err(RecordError::ReservedKey { key });
        }
        if self.extensions.contains_key(&key) {
            return Err(RecordError::DuplicateKey { key });
        }
        self.extensions.insert(key, value.into());
        Ok(())
    }

    /// Encode with the default codec.
    pub fn to_json(&self) -> Result<Value> {
        RecordCodec::default().encode(self)
    }

    /// Encode to a compact JSON string with the default codec.
    pub fn to_json_string(&self) -> Result<String> {
        RecordCodec::default().encode_to_string(self)
    }

    /// Decode a JSON string with the default codec.
    pub fn from_json_str(json: &str) -> Result<Self> {
        RecordCodec::default().decode_str(json)
    }

    /// Decode an already parsed JSON value with the default codec.
    pub fn from_json_value(value: Value) -> Result<Self> {
        RecordCodec::default().decode_value(value)
    }
}

impl<K: Default, M: ExtensionMode> Default for OpenRecord<K, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, M> Clone for OpenRecord<K, M>
where
    K: Clone,
    M: ExtensionMode,
    M::Value: Clone,
{
    fn clone(&self) -> Self {
        Self::from_parts_unchecked(self.known.clone(), self.extensions.clone())
    }
}

impl<K, M> fmt::Debug for OpenRecord<K, M>
where
    K: fmt::Debug,
    M: ExtensionMode,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRecord")
            .field("known", &self.known)
            .field("extensions", &self.extensions)
            .finish()
    }
}

/// Extension order is not significant for equality.
impl<K, M> PartialEq for OpenRecord<K, M>
where
    K: PartialEq,
    M: ExtensionMode,
    M::Value: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.known == other.known && self.extensions == other.extensions
    }
}

/// Encodes with [`CodecOptions::default`](crate::config::CodecOptions::default).
impl<K: KnownFields, M: ExtensionMode> Serialize for OpenRecord<K, M> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = RecordCodec::default()
            .encode(self)
            .map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

/// Decodes with [`CodecOptions::default`](crate::config::CodecOptions::default),
/// including when the record sits inside a known field of a record decoded by
/// a differently configured [`RecordCodec`].
impl<'de, K: KnownFields, M: ExtensionMode> Deserialize<'de> for OpenRecord<K, M> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        RecordCodec::default()
            .decode_value(value)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::known_fields! {
        #[derive(Debug, Clone, PartialEq)]
        struct Fields {
            "prop1" => pub prop1: String,
            "prop2" => pub prop2: i64,
        }
    }

    #[test]
    fn test_add_get_remove() {
        let mut record = DynamicRecord::<Fields>::new();
        record.add("baz", "baz").unwrap();
        assert_eq!(record.get("baz"), Some(&Dynamic::from("baz")));
        assert_eq!(record.len(), 1);

        assert_eq!(record.remove("baz"), Some(Dynamic::from("baz")));
        assert!(record.get("baz").is_none());
        assert!(record.remove("baz").is_none());
        assert!(record.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut record = TypedRecord::<Fields, i64>::new();
        record.add("n", 1).unwrap();
        let err = record.add("n", 2).unwrap_err();
        assert_eq!(err, RecordError::DuplicateKey { key: "n".into() });
        assert_eq!(record.get("n"), Some(&1));
    }

    #[test]
    fn test_add_rejects_known_field_names() {
        let mut record = DynamicRecord::<Fields>::new();
        let err = record.add("prop1", "shadow").unwrap_err();
        assert_eq!(err, RecordError::ReservedKey { key: "prop1".into() });
        assert!(record.is_empty());
        // Wire names are matched case-sensitively.
        record.add("Prop1", "ok").unwrap();
    }

    #[test]
    fn test_get_or_default() {
        let mut record = TypedRecord::<Fields, String>::new();
        assert_eq!(record.get_or_default("missing"), "");
        record.add("here", "value".to_string()).unwrap();
        assert_eq!(record.get_or_default("here"), "value");

        let dynamic = DynamicRecord::<Fields>::new();
        assert!(dynamic.get_or_default("missing").is_null());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut record = DynamicRecord::<Fields>::new();
        for key in ["a", "b", "c", "d"] {
            record.add(key, 1i64).unwrap();
        }
        record.remove("b");
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_equality_ignores_extension_order() {
        let mut left = DynamicRecord::<Fields>::new();
        left.add("a", 1i64).unwrap();
        left.add("b", 2i64).unwrap();
        let mut right = DynamicRecord::<Fields>::new();
        right.add("b", 2i64).unwrap();
        right.add("a", 1i64).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_serde_impls_flatten() {
        let mut record = DynamicRecord::<Fields>::new();
        record.known.prop2 = Some(7);
        record.add("x", true).unwrap();
        let wrapped = serde_json::json!({ "record": record });
        assert_eq!(wrapped.to_string(), r#"{"record":{"prop2":7,"x":true}}"#);

        let back: DynamicRecord<Fields> =
            serde_json::from_value(wrapped["record"].clone()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserialize_error_surfaces_through_serde() {
        let result: std::result::Result<DynamicRecord<Fields>, _> =
            serde_json::from_str("[1]");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Expected a JSON object"));
    }
}
