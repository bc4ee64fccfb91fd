//! Loading environments from JSON documents.
//!
//! The document must be a flat object whose values are all strings. Keys are
//! taken in document order, so the encoded environment follows the file.

use anyhow::{Context, Result};
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::uboot::{EnvError, Environment};

/// Error turning a JSON document into an environment.
#[derive(Debug, Error)]
pub enum JsonEnvError {
    #[error("malformed environment JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Env(#[from] EnvError),
}

/// Parse a JSON document into an environment.
pub fn parse_str(text: &str) -> Result<Environment, JsonEnvError> {
    let RawEntries(entries) = serde_json::from_str(text)?;
    Ok(Environment::from_pairs(entries)?)
}

/// Read and parse a JSON file into an environment.
pub fn load(path: impl AsRef<Path>) -> Result<Environment> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_str(&text).with_context(|| format!("Failed to load environment from {}", path.display()))
}

/// Entries of a flat string object, in document order and with duplicates.
struct RawEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = RawEntries;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a flat JSON object with string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<String>()? {
            match map.next_value::<Value>()? {
                Value::String(value) => entries.push((key, value)),
                other => {
                    return Err(de::Error::custom(format_args!(
                        "value of `{key}` must be a string, found {}",
                        kind(&other)
                    )))
                }
            }
        }
        Ok(RawEntries(entries))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
