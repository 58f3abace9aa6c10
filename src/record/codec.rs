//! Flattening codec.
//!
//! Maps an [`OpenRecord`] to a single JSON object in which known fields and
//! extensions are siblings, and back.

use super::error::{json_kind_name, RecordError};
use super::known::KnownFields;
use super::mode::ExtensionMode;
use super::OpenRecord;
use crate::config::CodecOptions;
use crate::Result;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Encoder/decoder for open-schema records.
///
/// Holds only immutable options, so one codec can be shared freely.
///
/// Options apply to the top-level record only. A record nested inside a
/// known field (for example `Context.system`) is handled by its serde impls,
/// which always use [`CodecOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct RecordCodec {
    options: CodecOptions,
}

impl RecordCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Options this codec was built with.
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Encode a record into one flat JSON object.
    ///
    /// Known fields come first in declaration order, followed by extensions
    /// in insertion order. Unset known fields are omitted, and so are empty
    /// strings when `lenient_empty_fields` is on, since decoding would read
    /// them back as unset.
    pub fn encode<K, M>(&self, record: &OpenRecord<K, M>) -> Result<Value>
    where
        K: KnownFields,
        M: ExtensionMode,
    {
        let mut object = match serde_json::to_value(&record.known)? {
            Value::Object(map) => map,
            other => {
                return Err(RecordError::InvalidFormat {
                    found: json_kind_name(&other),
                }
                .into())
            }
        };
        let lenient = self.options.lenient_empty_fields;
        object.retain(|_, v| !(v.is_null() || (lenient && is_empty(v))));
        let known_count = object.len();

        for (key, value) in record.iter() {
            if K::is_reserved(key) || object.contains_key(key) {
                return Err(RecordError::KeyCollision { key: key.clone() }.into());
            }
            object.insert(key.clone(), M::encode_extension(key, value)?);
        }

        debug!(
            known = known_count,
            extensions = record.len(),
            mode = M::NAME,
            "encoded open record"
        );
        Ok(Value::Object(object))
    }

    /// [`encode`](Self::encode), then write compact JSON.
    pub fn encode_to_string<K, M>(&self, record: &OpenRecord<K, M>) -> Result<String>
    where
        K: KnownFields,
        M: ExtensionMode,
    {
        let value = self.encode(record)?;
        Ok(serde_json::to_string(&value)?)
    }

    /// Parse `json` and [`decode_value`](Self::decode_value) it.
    pub fn decode_str<K, M>(&self, json: &str) -> Result<OpenRecord<K, M>>
    where
        K: KnownFields,
        M: ExtensionMode,
    {
        let value: Value = serde_json::from_str(json)?;
        self.decode_value(value)
    }

    /// Decode a JSON value, which must be an object.
    ///
    /// Reserved keys feed the known fields; every other key becomes an
    /// extension decoded according to `M`.
    pub fn decode_value<K, M>(&self, value: Value) -> Result<OpenRecord<K, M>>
    where
        K: KnownFields,
        M: ExtensionMode,
    {
        let object = match value {
            Value::Object(map) => map,
            other => {
                return Err(RecordError::InvalidFormat {
                    found: json_kind_name(&other),
                }
                .into())
            }
        };

        let mut known = Map::new();
        let mut extensions = IndexMap::with_capacity(object.len());
        for (key, raw) in object {
            if K::is_reserved(&key) {
                if self.options.lenient_empty_fields && is_empty(&raw) {
                    trace!(field = %key, "empty known field left unset");
                    continue;
                }
                known.insert(key, raw);
                continue;
            }
            if self.options.skip_null_extensions && raw.is_null() {
                trace!(key = %key, "null extension skipped");
                continue;
            }
            let decoded = M::decode_extension(&key, raw)?;
            extensions.insert(key, decoded);
        }

        let known_count = known.len();
        let known: K = serde_json::from_value(Value::Object(known)).map_err(|e| {
            RecordError::KnownField {
                reason: e.to_string(),
            }
        })?;

        debug!(
            known = known_count,
            extensions = extensions.len(),
            mode = M::NAME,
            "decoded open record"
        );
        Ok(OpenRecord::from_parts_unchecked(known, extensions))
    }
}

fn is_empty(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
