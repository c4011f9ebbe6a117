//! Schemas for values that may be absent.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use super::{AnySchema, Introspect, Schema, SchemaKind, SharedSchema};
use crate::errors::BuildError;
use crate::violations::{ListError, ValidationError};

/// Wraps an inner schema over `T` and processes `Option<T>`.
///
/// `None` is accepted unless the schema is [`required`](Self::required).
/// `Some` values are handed to the inner schema in place, so defaults it
/// applies are visible to the caller.
pub struct OptionalSchema<T> {
    inner: SharedSchema<T>,
    required: bool,
}

/// Wraps `inner` so that absence is allowed.
pub fn optional<S>(inner: S) -> OptionalSchema<S::Value>
where
    S: Schema + 'static,
{
    OptionalSchema::new(Arc::new(inner))
}

impl<T> OptionalSchema<T> {
    /// Creates a schema around a shared inner schema.
    #[must_use]
    pub fn new(inner: SharedSchema<T>) -> Self {
        Self {
            inner,
            required: false,
        }
    }

    /// Rejects `None` with `["required"]`.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets whether `None` is rejected.
    #[must_use]
    pub fn with_required(mut self, value: bool) -> Self {
        self.required = value;
        self
    }

    /// Whether `None` is rejected.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The wrapped schema.
    #[must_use]
    pub fn inner(&self) -> &SharedSchema<T> {
        &self.inner
    }
}

impl<T: 'static> OptionalSchema<T> {
    /// Replaces the inner schema with a type-erased one.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::TypeMismatch`] unless `inner` processes `T`.
    pub fn with_inner_any(mut self, inner: &AnySchema) -> Result<Self, BuildError> {
        let context = format!("OptionalSchema<{}>", type_name::<T>());
        self.inner = inner.downcast::<T>(&context)?;
        Ok(self)
    }
}

impl<T: 'static> Introspect for OptionalSchema<T> {
    fn required_variant(&self, required: bool) -> Option<AnySchema> {
        Some(AnySchema::new(self.clone().with_required(required)))
    }

    fn inner_schema(&self) -> Option<AnySchema> {
        Some(AnySchema::from_shared(Arc::clone(&self.inner)))
    }

    fn inner_variant(&self, inner: &AnySchema) -> Option<Result<AnySchema, BuildError>> {
        Some(self.clone().with_inner_any(inner).map(AnySchema::new))
    }
}

impl<T: 'static> Schema for OptionalSchema<T> {
    type Value = Option<T>;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Optional
    }

    fn process(&self, value: &mut Option<T>) -> Result<(), ValidationError> {
        match value {
            Some(inner) => self.inner.process(inner),
            None if self.required => Err(ListError::required().into()),
            None => Ok(()),
        }
    }

    fn is_required(&self) -> bool {
        self.required
    }
}

impl<T> Clone for OptionalSchema<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            required: self.required,
        }
    }
}

impl<T> fmt::Debug for OptionalSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalSchema")
            .field("inner", &self.inner.type_name())
            .field("required", &self.required)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{int, text, text_from};

    #[test]
    fn test_absent_is_allowed_by_default() {
        let schema = optional(int().required());

        assert!(schema.process(&mut None).is_ok());
        assert!(schema.process(&mut Some(1)).is_ok());
        assert_eq!(
            schema.process(&mut Some(0)).unwrap_err().to_string(),
            r#"["required"]"#
        );
    }

    #[test]
    fn test_required_rejects_absent() {
        let schema = optional(int()).required();
        assert_eq!(
            schema.process(&mut None).unwrap_err().to_string(),
            r#"["required"]"#
        );
        assert!(schema.is_required());
        assert!(!schema.clone().with_required(false).is_required());
    }

    #[test]
    fn test_inner_mutations_are_visible() {
        let schema = optional(text().default("anonymous".to_string()));

        let mut value = Some(String::new());
        assert!(schema.process(&mut value).is_ok());
        assert_eq!(value.as_deref(), Some("anonymous"));
    }

    #[test]
    fn test_optional_over_converted_schema() {
        let schema = optional(text_from::<u16>());
        assert!(schema.process(&mut Some(8080)).is_ok());
        assert_eq!(schema.kind(), SchemaKind::Optional);
        assert_eq!(schema.type_name(), "core::option::Option<u16>");
    }

    #[test]
    fn test_with_inner_any_checks_type() {
        let schema = optional(int());
        let replaced = schema.clone().with_inner_any(&AnySchema::new(int().required()));
        assert!(replaced.unwrap().process(&mut Some(0)).is_err());

        let err = schema.with_inner_any(&AnySchema::new(text())).unwrap_err();
        assert!(matches!(
            err,
            BuildError::TypeMismatch { expected: "i64", found: "alloc::string::String", .. }
        ));
    }
}
