//! Record error types

/// Errors raised while building, encoding or decoding an open-schema record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Extension '{key}' already exists")]
    DuplicateKey { key: String },

    #[error("Key '{key}' is reserved for a known field")]
    ReservedKey { key: String },

    #[error("Expected a JSON object, found {found}")]
    InvalidFormat { found: &'static str },

    #[error("Extension '{key}' does not match {expected}: {reason}")]
    ExtensionType {
        key: String,
        expected: &'static str,
        reason: String,
    },

    #[error("Extension '{key}' collides with a known field")]
    KeyCollision { key: String },

    #[error("Known field value is invalid: {reason}")]
    KnownField { reason: String },

    #[error("Extension '{key}' holds a non-finite float")]
    NonFiniteFloat { key: String },
}

impl RecordError {
    /// The extension or field key the error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            RecordError::DuplicateKey { key }
            | RecordError::ReservedKey { key }
            | RecordError::ExtensionType { key, .. }
            | RecordError::KeyCollision { key }
            | RecordError::NonFiniteFloat { key } => Some(key),
            RecordError::InvalidFormat { .. } | RecordError::KnownField { .. } => None,
        }
    }
}

/// Name of a JSON value's kind, as used in error messages.
pub(crate) fn json_kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
