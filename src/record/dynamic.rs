//! Dynamic extension values.
//!
//! Untyped records store each extension as a [`Dynamic`], chosen by
//! inspecting the kind of the raw JSON value (see [`DynamicKind::of`]).

use indexmap::IndexMap;
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Nested open object: keys keep their wire order.
pub type DynamicObject = IndexMap<String, Dynamic>;

/// Discriminator for [`Dynamic`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicKind {
    String,
    Integer,
    Float,
    Object,
    Other,
}

impl DynamicKind {
    /// Kind a raw JSON value decodes into.
    ///
    /// Strings, numbers written with a fraction or exponent, and objects are
    /// dispatched directly. Everything else goes through the fallback, where
    /// integers that fit in `i64` become [`DynamicKind::Integer`].
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::String,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Object(_) => Self::Object,
            Value::Number(n) if n.is_i64() => Self::Integer,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Object => "object",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DynamicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heterogeneous extension value.
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamic {
    String(String),
    Integer(i64),
    Float(f64),
    /// Nested open value, decoded recursively rather than merged into the parent.
    Object(DynamicObject),
    /// Booleans, arrays, null and integers outside the `i64` range.
    Other(Value),
}

impl Dynamic {
    /// Decode a raw JSON value by dispatching on its kind.
    pub fn from_json(value: Value) -> Self {
        match DynamicKind::of(&value) {
            DynamicKind::String | DynamicKind::Float | DynamicKind::Object => {
                Self::from_native(value)
            }
            DynamicKind::Integer | DynamicKind::Other => Self::from_fallback(value),
        }
    }

    fn from_native(value: Value) -> Self {
        match value {
            Value::String(s) => Dynamic::String(s),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Dynamic::Float(f),
                None => Dynamic::Other(Value::Number(n)),
            },
            Value::Object(map) => Dynamic::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Dynamic::from_json(v)))
                    .collect(),
            ),
            other => Dynamic::Other(other),
        }
    }

    fn from_fallback(value: Value) -> Self {
        match value.as_i64() {
            Some(i) => Dynamic::Integer(i),
            None => Dynamic::Other(value),
        }
    }

    pub fn kind(&self) -> DynamicKind {
        match self {
            Dynamic::String(_) => DynamicKind::String,
            Dynamic::Integer(_) => DynamicKind::Integer,
            Dynamic::Float(_) => DynamicKind::Float,
            Dynamic::Object(_) => DynamicKind::Object,
            Dynamic::Other(_) => DynamicKind::Other,
        }
    }

    /// Convert back into a plain JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Dynamic::String(s) => Value::String(s.clone()),
            Dynamic::Integer(i) => Value::from(*i),
            Dynamic::Float(f) => Value::from(*f),
            Dynamic::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Dynamic::Other(v) => v.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Dynamic::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Floating point view; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Dynamic::Float(f) => Some(*f),
            Dynamic::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Other(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DynamicObject> {
        match self {
            Dynamic::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Other(Value::Null))
    }

    /// False when this value, or any value nested in it, is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            Dynamic::Float(f) => f.is_finite(),
            Dynamic::Object(map) => map.values().all(Dynamic::is_finite),
            _ => true,
        }
    }
}

impl Default for Dynamic {
    fn default() -> Self {
        Dynamic::Other(Value::Null)
    }
}

impl Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Dynamic::String(s) => serializer.serialize_str(s),
            Dynamic::Integer(i) => serializer.serialize_i64(*i),
            Dynamic::Float(f) if !f.is_finite() => {
                Err(ser::Error::custom(format!("non-finite float {f} has no JSON form")))
            }
            Dynamic::Float(f) => serializer.serialize_f64(*f),
            Dynamic::Object(map) => map.serialize(serializer),
            Dynamic::Other(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Dynamic::from_json)
    }
}

/// Strings print raw; every other kind prints as compact JSON.
impl fmt::Display for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::String(s) => f.write_str(s),
            Dynamic::Float(x) if !x.is_finite() => write!(f, "{x}"),
            other => {
                let text = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

impl From<&str> for Dynamic {
    fn from(s: &str) -> Self {
        Dynamic::String(s.to_string())
    }
}

impl From<String> for Dynamic {
    fn from(s: String) -> Self {
        Dynamic::String(s)
    }
}

impl From<i64> for Dynamic {
    fn from(i: i64) -> Self {
        Dynamic::Integer(i)
    }
}

impl From<i32> for Dynamic {
    fn from(i: i32) -> Self {
        Dynamic::Integer(i64::from(i))
    }
}

impl From<f64> for Dynamic {
    fn from(f: f64) -> Self {
        Dynamic::Float(f)
    }
}

impl From<bool> for Dynamic {
    fn from(b: bool) -> Self {
        Dynamic::Other(Value::Bool(b))
    }
}

impl From<DynamicObject> for Dynamic {
    fn from(map: DynamicObject) -> Self {
        Dynamic::Object(map)
    }
}

impl From<Value> for Dynamic {
    fn from(value: Value) -> Self {
        Dynamic::from_json(value)
    }
}
