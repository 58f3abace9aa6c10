//! Known-field declarations.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The statically declared part of an open-schema record.
///
/// `FIELD_NAMES` lists the wire names this type serializes to. Those names
/// are reserved: they are never decoded into, or accepted as, extensions.
/// Implementations must serialize to a JSON object and should skip unset
/// fields; [`known_fields!`](crate::known_fields) generates both.
pub trait KnownFields: Serialize + DeserializeOwned + Default {
    const FIELD_NAMES: &'static [&'static str];

    fn is_reserved(key: &str) -> bool {
        Self::FIELD_NAMES.contains(&key)
    }
}

/// Known fields for records that carry extensions only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoKnownFields {}

impl KnownFields for NoKnownFields {
    const FIELD_NAMES: &'static [&'static str] = &[];
}

/// Declare a known-fields struct.
///
/// Every field is stored as `Option<T>`, renamed to its wire name and
/// skipped when `None`. The invoking crate must depend on `serde`.
///
/// ```
/// use watson_sdk::known_fields;
///
/// known_fields! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct TestFields {
///         "prop1" => pub prop1: String,
///         "prop2" => pub prop2: i64,
///     }
/// }
///
/// use watson_sdk::record::KnownFields;
/// assert_eq!(TestFields::FIELD_NAMES, &["prop1", "prop2"]);
/// ```
#[macro_export]
macro_rules! known_fields {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $wire:literal => $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Default, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                #[serde(rename = $wire, default, skip_serializing_if = "Option::is_none")]
                $field_vis $field: ::core::option::Option<$ty>,
            )*
        }

        impl $crate::record::KnownFields for $name {
            const FIELD_NAMES: &'static [&'static str] = &[$($wire),*];
        }
    };
}
