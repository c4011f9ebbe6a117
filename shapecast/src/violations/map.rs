//! Keyed aggregation of nested failures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::ValidationError;

/// Failures keyed by record field (external name) or sequence index.
///
/// Keys are unique and entries only exist for actual failures, so an empty
/// map means "no error" and is never surfaced through [`MapError::into_result`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapError(BTreeMap<String, ValidationError>);

impl MapError {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` under `key`. A `None` error is ignored; an existing
    /// entry under the same key is overwritten.
    pub fn add(&mut self, key: impl Into<String>, error: Option<ValidationError>) {
        if let Some(error) = error {
            self.0.insert(key.into(), error);
        }
    }

    /// Returns the error stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ValidationError> {
        self.0.get(key)
    }

    /// Whether an error is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of failing keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Nested errors in key order.
    pub fn values(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.values()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Normalizes into a processing result: empty means success.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Map(self))
        }
    }

    /// Converts to the JSON wire representation.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl std::error::Error for MapError {}
