//! Structured validation failures.
//!
//! Every schema reports failures through one of two shapes:
//! - [`ListError`]: an ordered list of simple reasons for a single value
//! - [`MapError`]: a keyed aggregation of nested errors (record fields,
//!   sequence indices)
//!
//! Both serialize to a plain JSON tree (arrays of strings inside objects), which
//! is the wire contract API responses and logs rely on.

mod list;
mod map;

pub use list::{ListError, Violation, REQUIRED};
pub use map::MapError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure produced by processing a value against a schema.
///
/// An instance of this type always carries at least one violation: empty lists
/// and maps are normalized to `Ok(())` before they leave a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationError {
    /// Failures of a single value or of a whole sequence.
    #[error(transparent)]
    List(ListError),
    /// Failures keyed by field name or sequence index.
    #[error(transparent)]
    Map(MapError),
}

impl ValidationError {
    /// Returns the list form, if this is a list error.
    #[must_use]
    pub fn as_list(&self) -> Option<&ListError> {
        match self {
            Self::List(list) => Some(list),
            Self::Map(_) => None,
        }
    }

    /// Returns the map form, if this is a map error.
    #[must_use]
    pub fn as_map(&self) -> Option<&MapError> {
        match self {
            Self::Map(map) => Some(map),
            Self::List(_) => None,
        }
    }

    /// Looks up a nested error by key. Always `None` for list errors.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Follows a path of keys through nested map errors.
    #[must_use]
    pub fn at(&self, path: &[&str]) -> Option<&Self> {
        path.iter().try_fold(self, |err, key| err.get(key))
    }

    /// Counts the leaf violations in the whole tree.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        match self {
            Self::List(list) => list.len(),
            Self::Map(map) => map.values().map(Self::violation_count).sum(),
        }
    }

    /// Converts to the JSON wire representation.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Self::List(list) => list.to_value(),
            Self::Map(map) => map.to_value(),
        }
    }
}

impl From<ListError> for ValidationError {
    fn from(err: ListError) -> Self {
        Self::List(err)
    }
}

impl From<MapError> for ValidationError {
    fn from(err: MapError) -> Self {
        Self::Map(err)
    }
}
