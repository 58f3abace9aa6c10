//! Extension modes: how the leftover keys of a decoded object become values.

use super::dynamic::Dynamic;
use super::error::RecordError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Selects the extension value type of a record at type-definition time.
///
/// Encoding goes through `Serialize` unless a mode needs to check values
/// first; decoding of extension values is mode specific.
pub trait ExtensionMode {
    type Value: Serialize;

    /// Short name used in logs.
    const NAME: &'static str;

    fn decode_extension(key: &str, raw: Value) -> Result<Self::Value, RecordError>;

    /// Convert one extension value into its wire form.
    fn encode_extension(_key: &str, value: &Self::Value) -> crate::Result<Value> {
        Ok(serde_json::to_value(value)?)
    }
}

/// Restricted mode: every extension is a `V`.
pub struct Typed<V>(PhantomData<fn() -> V>);

impl<V> ExtensionMode for Typed<V>
where
    V: Serialize + DeserializeOwned,
{
    type Value = V;
    const NAME: &'static str = "typed";

    fn decode_extension(key: &str, raw: Value) -> Result<V, RecordError> {
        serde_json::from_value(raw).map_err(|e| RecordError::ExtensionType {
            key: key.to_string(),
            expected: std::any::type_name::<V>(),
            reason: e.to_string(),
        })
    }
}

/// Unrestricted mode: extensions are [`Dynamic`] values chosen by JSON kind.
pub struct Untyped;

impl ExtensionMode for Untyped {
    type Value = Dynamic;
    const NAME: &'static str = "untyped";

    fn decode_extension(_key: &str, raw: Value) -> Result<Dynamic, RecordError> {
        Ok(Dynamic::from_json(raw))
    }

    /// JSON has no NaN or infinity; serde would write them as `null`.
    fn encode_extension(key: &str, value: &Dynamic) -> crate::Result<Value> {
        if !value.is_finite() {
            return Err(RecordError::NonFiniteFloat {
                key: key.to_string(),
            }
            .into());
        }
        Ok(value.to_json())
    }
}
