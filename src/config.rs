//! # Configuration Mapping
//!
//! A generator receives its configuration as a `serde_yaml::Mapping`: the
//! already-loaded, already-templated YAML block describing one view or job.
//! This module provides the small set of lookups the generators need on top
//! of it, plus the rules for turning a YAML value into element text.
//!
//! An explicit YAML `null` is treated the same as an absent key everywhere.

use crate::error::{Error, Result};
use serde_yaml::{Mapping, Value};

/// The configuration block handed to a single generator call.
pub type Config = Mapping;

/// Look up `key`, treating `null` as absent.
pub fn lookup<'a>(config: &'a Config, key: &str) -> Option<&'a Value> {
    match config.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Look up `key` as a string slice. Non-string values yield `None`.
pub fn get_str<'a>(config: &'a Config, key: &str) -> Option<&'a str> {
    lookup(config, key).and_then(Value::as_str)
}

/// Look up `key` as a nested mapping. Non-mapping values yield `None`.
pub fn get_mapping<'a>(config: &'a Config, key: &str) -> Option<&'a Mapping> {
    lookup(config, key).and_then(Value::as_mapping)
}

/// Look up `key` as a sequence. Absent keys yield `None`; a single scalar is
/// not promoted to a one-element list.
pub fn get_sequence<'a>(config: &'a Config, key: &str) -> Option<&'a [Value]> {
    lookup(config, key)
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
}

/// Whether a value counts as "set" for flag-like keys such as `parent`.
///
/// `false`, empty strings, zero and empty collections are unset.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Render a value as element text.
///
/// Booleans become lowercase `true`/`false`, strings are used verbatim,
/// numbers use their natural decimal form. Sequences and mappings have no
/// XML-native form and are rendered as compact JSON.
pub fn render_value(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Tagged(tagged) => render_value(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_json::to_string(value).map_err(|e| Error::Serialization {
                message: e.to_string(),
            })
        }
    }
}

/// Parse a YAML document that must hold a single mapping.
pub fn parse_mapping(yaml: &str) -> Result<Config> {
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(Error::config("Expected a YAML mapping")),
    }
}
