//! Ordered lists of simple failure reasons.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Reason reported when a required value is missing.
pub const REQUIRED: &str = "required";

/// A single textual failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violation(String);

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// The reason reported for missing values.
    #[must_use]
    pub fn required() -> Self {
        Self::new(REQUIRED)
    }

    /// Returns the reason text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Violation {
    fn from(reason: &str) -> Self {
        Self::new(reason)
    }
}

impl From<String> for Violation {
    fn from(reason: String) -> Self {
        Self(reason)
    }
}

impl PartialEq<str> for Violation {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Violation {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered failures of a single value (or of a whole sequence).
///
/// Order is the order in which the checks were declared and run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListError(Vec<Violation>);

impl ListError {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list holding one reason.
    #[must_use]
    pub fn single(reason: impl Into<Violation>) -> Self {
        Self(vec![reason.into()])
    }

    /// Creates the `["required"]` list.
    #[must_use]
    pub fn required() -> Self {
        Self::single(Violation::required())
    }

    /// Appends a reason.
    pub fn push(&mut self, reason: impl Into<Violation>) {
        self.0.push(reason.into());
    }

    /// Number of reasons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no reason was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the reasons in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Whether this is exactly the `["required"]` list.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only == REQUIRED)
    }

    /// Normalizes into a processing result: empty means success.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::List(self))
        }
    }

    /// Converts to the JSON wire representation.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.0
                .iter()
                .map(|v| serde_json::Value::String(v.as_str().to_string()))
                .collect(),
        )
    }
}

impl<V: Into<Violation>> FromIterator<V> for ListError {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a ListError {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl std::error::Error for ListError {}
