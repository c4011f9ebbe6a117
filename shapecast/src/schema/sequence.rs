//! Schemas for ordered collections.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use super::{AnySchema, Introspect, Schema, SchemaKind, SharedSchema, Test};
use crate::errors::BuildError;
use crate::violations::{ListError, MapError, ValidationError};

/// Wraps an inner schema over `T` and processes `Vec<T>`.
///
/// Whole-sequence tests run first. If any of them fails only those failures
/// are reported; otherwise every element is processed in place and failures
/// are keyed by the element's index.
pub struct SequenceSchema<T> {
    inner: SharedSchema<T>,
    tests: Vec<Test<[T]>>,
}

/// Applies `inner` to every element of a `Vec`.
pub fn sequence<S>(inner: S) -> SequenceSchema<S::Value>
where
    S: Schema + 'static,
{
    SequenceSchema::new(Arc::new(inner))
}

impl<T> SequenceSchema<T> {
    /// Creates a schema around a shared element schema.
    #[must_use]
    pub fn new(inner: SharedSchema<T>) -> Self {
        Self {
            inner,
            tests: Vec::new(),
        }
    }

    /// Sets the whole-sequence tests, replacing any configured before.
    #[must_use]
    pub fn tests(mut self, tests: impl IntoIterator<Item = Test<[T]>>) -> Self {
        self.tests = tests.into_iter().collect();
        self
    }

    /// Appends one whole-sequence test.
    #[must_use]
    pub fn test(mut self, test: Test<[T]>) -> Self {
        self.tests.push(test);
        self
    }

    /// The element schema.
    #[must_use]
    pub fn inner(&self) -> &SharedSchema<T> {
        &self.inner
    }

    /// Replaces the element schema.
    #[must_use]
    pub fn with_inner<S>(mut self, inner: S) -> Self
    where
        S: Schema<Value = T> + 'static,
    {
        self.inner = Arc::new(inner);
        self
    }

    /// The configured whole-sequence tests.
    #[must_use]
    pub fn test_list(&self) -> &[Test<[T]>] {
        &self.tests
    }
}

impl<T: 'static> SequenceSchema<T> {
    /// Replaces the element schema with a type-erased one.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::TypeMismatch`] unless `inner` processes `T`.
    pub fn with_inner_any(mut self, inner: &AnySchema) -> Result<Self, BuildError> {
        let context = format!("SequenceSchema<{}>", type_name::<T>());
        self.inner = inner.downcast::<T>(&context)?;
        Ok(self)
    }
}

impl<T: 'static> Introspect for SequenceSchema<T> {
    fn inner_schema(&self) -> Option<AnySchema> {
        Some(AnySchema::from_shared(Arc::clone(&self.inner)))
    }

    fn inner_variant(&self, inner: &AnySchema) -> Option<Result<AnySchema, BuildError>> {
        Some(self.clone().with_inner_any(inner).map(AnySchema::new))
    }
}

impl<T: 'static> Schema for SequenceSchema<T> {
    type Value = Vec<T>;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Sequence
    }

    fn process(&self, value: &mut Vec<T>) -> Result<(), ValidationError> {
        let failed: ListError = self
            .tests
            .iter()
            .filter_map(|test| test.run(value.as_slice()).cloned())
            .collect();
        if !failed.is_empty() {
            return Err(failed.into());
        }

        let mut errors = MapError::new();
        for (index, element) in value.iter_mut().enumerate() {
            errors.add(index.to_string(), self.inner.process(element).err());
        }
        errors.into_result()
    }
}

impl<T> Clone for SequenceSchema<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            tests: self.tests.clone(),
        }
    }
}

impl<T> fmt::Debug for SequenceSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceSchema")
            .field("inner", &self.inner.type_name())
            .field("tests", &self.tests)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::{seq, text as texts};
    use crate::schema::{int, optional, text};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_element_errors_keyed_by_index() {
        let schema = sequence(text().test(texts::url()));

        assert!(schema.process(&mut vec!["http://wikipedia.org".to_string()]).is_ok());

        let mut values = vec!["http://x.org".to_string(), "bad".to_string(), String::new()];
        let err = schema.process(&mut values).unwrap_err();
        assert_eq!(
            err.to_value(),
            serde_json::json!({"1": ["invalid URL"], "2": ["invalid URL"]})
        );
    }

    #[test]
    fn test_sequence_tests_suppress_element_errors() {
        let schema = sequence(text().required()).test(seq::min_len(3));

        let mut values = vec![String::new()];
        let err = schema.process(&mut values).unwrap_err();
        assert_eq!(err.to_string(), r#"["must contain at least 3 items"]"#);
    }

    #[test]
    fn test_all_sequence_tests_run() {
        let schema = sequence(int()).tests([seq::min_len(3), seq::unique()]);

        let err = schema.process(&mut vec![1, 1]).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"["must contain at least 3 items","items must be unique"]"#
        );
    }

    #[test]
    fn test_elements_are_processed_in_place() {
        let schema = sequence(optional(int().default(7)));

        let mut values = vec![Some(0), None, Some(3)];
        assert!(schema.process(&mut values).is_ok());
        assert_eq!(values, vec![Some(7), None, Some(3)]);
    }

    #[test]
    fn test_with_inner_any_rejects_mismatch() {
        let schema = sequence(text());
        assert!(schema.clone().with_inner_any(&AnySchema::new(text().required())).is_ok());

        let err = schema.with_inner_any(&AnySchema::new(int())).unwrap_err();
        assert_eq!(
            err,
            BuildError::type_mismatch(
                "SequenceSchema<alloc::string::String>",
                "alloc::string::String",
                "i64"
            )
        );
    }

    #[test]
    fn test_with_inner_replaces_schema() {
        let schema = sequence(int()).with_inner(int().required());
        let err = schema.process(&mut vec![1, 0]).unwrap_err();
        assert_eq!(err.to_string(), r#"{"1":["required"]}"#);
        assert_eq!(schema.inner().kind(), SchemaKind::Atomic);
    }

    proptest! {
        #[test]
        fn prop_failed_indices_match_input(values in prop::collection::vec(-5i64..5, 0..40)) {
            let schema = sequence(int().required());
            let mut input = values.clone();
            let expected: Vec<String> = values
                .iter()
                .enumerate()
                .filter(|(_, v)| **v == 0)
                .map(|(i, _)| i.to_string())
                .collect();

            match schema.process(&mut input) {
                Ok(()) => prop_assert!(expected.is_empty()),
                Err(err) => {
                    let map = err.as_map().unwrap();
                    let mut keys: Vec<String> = map.keys().map(str::to_string).collect();
                    let mut expected = expected;
                    keys.sort();
                    expected.sort();
                    prop_assert_eq!(keys, expected);
                }
            }
        }
    }
}
