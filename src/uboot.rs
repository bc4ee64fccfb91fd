//! U-Boot environment encoding.
//!
//! The bootloader reads its environment as a flat byte stream:
//!
//! ```text
//! offset 0..4   : CRC32 of the payload, little-endian
//! offset 4..EOF : "name=value" entries, each terminated by a NUL byte
//! ```
//!
//! An empty environment still carries a single NUL byte as payload.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::common::write_file_atomic;

/// Size of the checksum header in front of the payload.
pub const HEADER_SIZE: usize = 4;

/// Which half of an entry a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Value => f.write_str("value"),
        }
    }
}

/// Error building or encoding an environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("non-ASCII character {ch:?} in {field} of `{key}` at byte {position}")]
    NonAscii {
        key: String,
        field: Field,
        ch: char,
        position: usize,
    },
    #[error("invalid variable name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("value of `{key}` contains a NUL byte")]
    InvalidValue { key: String },
    #[error("duplicate variable `{0}`")]
    DuplicateKey(String),
}

/// An ordered bootloader environment.
///
/// Entries keep their insertion order, which is also the order they are
/// written in. Every entry has been validated with [`validate_entry`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Environment {
    entries: Vec<(String, String)>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an environment from pairs, rejecting invalid and duplicate names.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, EnvError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut env = Self::new();
        for (key, value) in pairs {
            env.insert_new(key, value)?;
        }
        Ok(env)
    }

    /// Append a new entry; fails if `key` is already present.
    pub fn insert_new(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), EnvError> {
        let (key, value) = (key.into(), value.into());
        validate_entry(&key, &value)?;
        if self.get(&key).is_some() {
            return Err(EnvError::DuplicateKey(key));
        }
        self.entries.push((key, value));
        Ok(())
    }

    /// Set a value, replacing an existing entry in place or appending a new one.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), EnvError> {
        let value = value.into();
        validate_entry(key, &value)?;
        match self.entries.iter_mut().find(|(name, _)| name == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_owned(), value)),
        }
        Ok(())
    }

    /// Get a value from the environment.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Remove a value from the environment.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(name, _)| name == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Encode the environment in U-Boot's binary representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut blob = Blob::new();
        for (key, value) in self.iter() {
            blob.push(key, value);
        }
        blob.finish()
    }

    /// Encode and save the environment to a file, replacing it if present.
    ///
    /// Returns the size of the written blob.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let blob = self.to_bytes();
        write_file_atomic(path, &blob)
            .with_context(|| format!("Failed to save environment to {}", path.display()))?;
        Ok(blob.len())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Encode `name=value` pairs in order.
///
/// Nothing is produced if any pair fails validation. Duplicate names are
/// written as given; the bootloader decides which one wins.
pub fn encode<I, K, V>(entries: I) -> Result<Vec<u8>, EnvError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut blob = Blob::new();
    for (key, value) in entries {
        let (key, value) = (key.as_ref(), value.as_ref());
        validate_entry(key, value)?;
        blob.push(key, value);
    }
    Ok(blob.finish())
}

/// Check that an entry can be represented in the environment.
pub fn validate_entry(key: &str, value: &str) -> Result<(), EnvError> {
    check_ascii(key, key, Field::Name)?;
    check_ascii(key, value, Field::Value)?;
    if key.is_empty() {
        return Err(EnvError::InvalidName {
            name: key.to_owned(),
            reason: "name is empty",
        });
    }
    if key.contains('=') {
        return Err(EnvError::InvalidName {
            name: key.to_owned(),
            reason: "name contains `=`",
        });
    }
    if key.contains('\0') {
        return Err(EnvError::InvalidName {
            name: key.to_owned(),
            reason: "name contains a NUL byte",
        });
    }
    if value.contains('\0') {
        return Err(EnvError::InvalidValue {
            key: key.to_owned(),
        });
    }
    Ok(())
}

fn check_ascii(key: &str, text: &str, field: Field) -> Result<(), EnvError> {
    match text.char_indices().find(|(_, ch)| !ch.is_ascii()) {
        Some((position, ch)) => Err(EnvError::NonAscii {
            key: key.to_owned(),
            field,
            ch,
            position,
        }),
        None => Ok(()),
    }
}

/// Compute the CRC32 (zlib polynomial) of the given data.
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Payload under construction, with room reserved for the header.
struct Blob {
    data: Vec<u8>,
    entries: usize,
}

impl Blob {
    fn new() -> Self {
        Self {
            data: vec![0; HEADER_SIZE],
            entries: 0,
        }
    }

    fn push(&mut self, key: &str, value: &str) {
        self.data.extend_from_slice(key.as_bytes());
        self.data.push(b'=');
        self.data.extend_from_slice(value.as_bytes());
        self.data.push(0);
        self.entries += 1;
    }

    fn finish(mut self) -> Vec<u8> {
        if self.entries == 0 {
            self.data.push(0);
        }
        let checksum = crc32(&self.data[HEADER_SIZE..]);
        self.data[..HEADER_SIZE].copy_from_slice(&checksum.to_le_bytes());
        self.data
    }
}
