//! Codec configuration.
//!
//! Options can be built in code, read from `WATSON_CODEC_*` environment
//! variables, or loaded from a YAML document:
//!
//! ```yaml
//! lenient_empty_fields: true
//! skip_null_extensions: false
//! ```

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_LENIENT_EMPTY_FIELDS: &str = "WATSON_CODEC_LENIENT_EMPTY_FIELDS";
pub const ENV_SKIP_NULL_EXTENSIONS: &str = "WATSON_CODEC_SKIP_NULL_EXTENSIONS";

/// Decode behavior of [`RecordCodec`](crate::record::RecordCodec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecOptions {
    /// Leave a known field unset when its raw value is `""` or `null`
    /// instead of handing it to the field's deserializer.
    pub lenient_empty_fields: bool,
    /// Drop extensions whose raw value is `null` while decoding.
    pub skip_null_extensions: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            lenient_empty_fields: true,
            skip_null_extensions: false,
        }
    }
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that hand every known field value to its deserializer.
    pub fn strict() -> Self {
        Self {
            lenient_empty_fields: false,
            ..Self::default()
        }
    }

    pub fn with_lenient_empty_fields(mut self, lenient: bool) -> Self {
        self.lenient_empty_fields = lenient;
        self
    }

    pub fn with_skip_null_extensions(mut self, skip: bool) -> Self {
        self.skip_null_extensions = skip;
        self
    }

    /// Defaults overridden by `WATSON_CODEC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(raw) = lookup(ENV_LENIENT_EMPTY_FIELDS) {
            options.lenient_empty_fields = parse_bool(ENV_LENIENT_EMPTY_FIELDS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SKIP_NULL_EXTENSIONS) {
            options.skip_null_extensions = parse_bool(ENV_SKIP_NULL_EXTENSIONS, &raw)?;
        }
        tracing::debug!(?options, "codec options resolved");
        Ok(options)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                "Invalid codec options",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("codec_options"),
            )
        })
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::configuration_with_context(
            format!("Expected a boolean, got '{}'", raw),
            ErrorContext::new()
                .with_field_path(name)
                .with_source("codec_options"),
        )),
    }
}
