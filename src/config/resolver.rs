//! Key→value resolvers the [`Config`](super::Config) adapter wraps.
//!
//! The adapter owns the fallback and pinning policy; resolvers only answer
//! "what does your source say for this exact key". Keeping the trait this
//! narrow lets tests substitute an in-memory map for the TOML file.

use crate::internal;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// The backing source does not exist at all — distinct from a single missing
/// key. The adapter reacts by pinning defaults for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotConfigured;

impl fmt::Display for NotConfigured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("configuration source not available")
    }
}

impl std::error::Error for NotConfigured {}

/// One lookup per key, no fallback logic. `Send + Sync` so a logger handle
/// can be shared across threads.
pub trait Resolver: Send + Sync {
    /// Returns the raw value for `key` exactly as the source spells it.
    ///
    /// # Errors
    /// [`NotConfigured`] when the source itself is missing.
    fn get(&self, key: &str) -> Result<Option<String>, NotConfigured>;
}

/// Flat `key = value` TOML file resolver.
///
/// A missing file is not a load error — it surfaces as [`NotConfigured`] on
/// the first lookup, which is what triggers default pinning in the adapter.
pub struct TomlResolver {
    table: Option<toml::Table>,
}

impl TomlResolver {
    /// Reads and parses the file at `path` if it exists.
    ///
    /// # Errors
    /// Fails only on unreadable or syntactically invalid TOML — absence is
    /// reported lazily through [`Resolver::get`].
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug(
                "CONFIG",
                &format!("Config file not found: {}", path.display()),
            );
            return Ok(Self { table: None });
        }
        let content = fs::read_to_string(path)?;
        let table: toml::Table = content.parse()?;
        internal::debug(
            "CONFIG",
            &format!("Config loaded from {}", path.display()),
        );
        Ok(Self { table: Some(table) })
    }
}

/// TOML scalars and arrays both flatten to the string form the adapter parses.
fn value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

impl Resolver for TomlResolver {
    fn get(&self, key: &str) -> Result<Option<String>, NotConfigured> {
        let Some(table) = &self.table else {
            return Err(NotConfigured);
        };
        Ok(table.get(key).map(value_to_string))
    }
}

/// In-memory resolver for tests and embedders that already hold settings.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    entries: HashMap<String, String>,
}

impl MapResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert, mirroring how override-style test setups read.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl Resolver for MapResolver {
    fn get(&self, key: &str) -> Result<Option<String>, NotConfigured> {
        Ok(self.entries.get(key).cloned())
    }
}
