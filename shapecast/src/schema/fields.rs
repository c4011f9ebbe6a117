//! Field name to schema mappings for record schemas.

use std::collections::BTreeMap;

use super::{AnySchema, Schema};

/// Maps record field names (the Rust identifiers) to their schemas.
///
/// The map itself is not checked against any record type; that happens when
/// a [`RecordSchema`](super::RecordSchema) is built from it.
#[derive(Debug, Clone, Default)]
pub struct FieldMap(BTreeMap<String, AnySchema>);

impl FieldMap {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the schema for `name`.
    #[must_use]
    pub fn with<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: Schema + 'static,
        S::Value: 'static,
    {
        self.with_any(name, AnySchema::new(schema))
    }

    /// Adds (or replaces) a type-erased schema for `name`.
    #[must_use]
    pub fn with_any(mut self, name: impl Into<String>, schema: AnySchema) -> Self {
        self.0.insert(name.into(), schema);
        self
    }

    /// Merges `other` into this mapping; entries of `other` win on collision.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// The schema configured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnySchema> {
        self.0.get(name)
    }

    /// Whether `name` has a schema.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Configured field names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in field name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnySchema)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of configured fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, AnySchema)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, AnySchema)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{int, text, SchemaKind};

    #[test]
    fn test_merge_overrides_and_keeps() {
        let base = FieldMap::new().with("a", int()).with("b", text());
        let more = FieldMap::new().with("b", int().required()).with("c", text());

        let merged = base.merge(more);
        assert_eq!(merged.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert!(merged.get("b").unwrap().is::<i64>());
        assert!(merged.get("b").unwrap().is_required());
        assert_eq!(merged.get("c").unwrap().kind(), SchemaKind::Atomic);
    }

    #[test]
    fn test_from_iterator() {
        let map: FieldMap = [("x", AnySchema::new(int()))].into_iter().collect();
        assert_eq!(map.len(), 1);
        assert!(map.contains("x"));
        assert!(!map.is_empty());
    }
}
