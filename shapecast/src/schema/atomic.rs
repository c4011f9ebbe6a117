//! Schemas for single scalar-like values.

use std::convert::Infallible;
use std::fmt;

use super::convert::{identity, owned, Converter, ToFloat};
use super::{AnySchema, Introspect, Schema, SchemaKind, Test};
use crate::violations::{ListError, ValidationError};

/// Describes a scalar value (or any value that is not processed recursively).
///
/// `T` is the stored type, `R` the type tests run against after conversion.
/// Processing a value:
/// 1. If it equals `T::default()`: fail with `["required"]` when required,
///    succeed untouched when `omit_empty` is set, otherwise replace it with
///    the configured default (if any).
/// 2. Convert it; a failed conversion is reported alone.
/// 3. Run every test and report all failures in declaration order.
pub struct AtomicSchema<T, R = T> {
    required: bool,
    omit_empty: bool,
    default: Option<T>,
    convert: Converter<T, R>,
    tests: Vec<Test<R>>,
}

/// Identity schema over `T`.
#[must_use]
pub fn atomic<T: 'static>() -> AtomicSchema<T, T> {
    AtomicSchema::with_converter(std::sync::Arc::new(identity::<T>))
}

/// Schema converting `T` into `R` before running tests.
///
/// The error's text becomes the reported violation.
pub fn atomic_from<T, R, E, F>(convert: F) -> AtomicSchema<T, R>
where
    T: 'static,
    R: 'static,
    E: fmt::Display + 'static,
    F: Fn(&T) -> Result<R, E> + Send + Sync + 'static,
{
    AtomicSchema::with_converter(owned(convert))
}

/// Integer shorthand.
#[must_use]
pub fn int() -> AtomicSchema<i64> {
    atomic()
}

/// Converts any integer-like type into `i64`.
#[must_use]
pub fn int_from<T>() -> AtomicSchema<T, i64>
where
    T: Copy + TryInto<i64> + 'static,
{
    atomic_from(|v: &T| (*v).try_into().map_err(|_| "integer out of range"))
}

/// Text shorthand.
#[must_use]
pub fn text() -> AtomicSchema<String> {
    atomic()
}

/// Converts any displayable type into `String`.
#[must_use]
pub fn text_from<T>() -> AtomicSchema<T, String>
where
    T: fmt::Display + 'static,
{
    atomic_from(|v: &T| Ok::<_, Infallible>(v.to_string()))
}

/// Float shorthand.
#[must_use]
pub fn float() -> AtomicSchema<f64> {
    atomic()
}

/// Converts floats, decimal text and JSON values into `f64`.
///
/// `serde_json::Number` has no zero value, so JSON input is processed as a
/// `serde_json::Value` (zero value `null`).
#[must_use]
pub fn float_from<T>() -> AtomicSchema<T, f64>
where
    T: ToFloat + 'static,
{
    atomic_from(|v: &T| v.to_float().ok_or("invalid number"))
}

impl<T, R> AtomicSchema<T, R> {
    fn with_converter(convert: Converter<T, R>) -> Self {
        Self {
            required: false,
            omit_empty: false,
            default: None,
            convert,
            tests: Vec::new(),
        }
    }

    /// Rejects the zero value with `["required"]`.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accepts the zero value as-is, skipping conversion and tests.
    ///
    /// Prefer wrapping the schema in an [`OptionalSchema`](super::OptionalSchema)
    /// when the value can be absent.
    #[must_use]
    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Replaces the zero value with `value` before conversion and tests.
    #[must_use]
    pub fn default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets the tests, replacing any configured before.
    #[must_use]
    pub fn tests(mut self, tests: impl IntoIterator<Item = Test<R>>) -> Self {
        self.tests = tests.into_iter().collect();
        self
    }

    /// Appends one test.
    #[must_use]
    pub fn test(mut self, test: Test<R>) -> Self {
        self.tests.push(test);
        self
    }

    /// Sets `required` and clears `omit_empty` (or the reverse).
    #[must_use]
    pub fn with_required(mut self, value: bool) -> Self {
        self.required = value;
        self.omit_empty = !value;
        self
    }

    /// Effective required-ness: explicitly required, or carrying tests
    /// without having opted into `omit_empty`.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required || (!self.omit_empty && !self.tests.is_empty())
    }

    /// The configured default, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// The configured tests.
    #[must_use]
    pub fn test_list(&self) -> &[Test<R>] {
        &self.tests
    }
}

impl<T, R> Introspect for AtomicSchema<T, R>
where
    T: Default + PartialEq + Clone + Send + Sync + 'static,
    R: 'static,
{
    fn required_variant(&self, required: bool) -> Option<AnySchema> {
        Some(AnySchema::new(self.clone().with_required(required)))
    }
}

impl<T, R> Schema for AtomicSchema<T, R>
where
    T: Default + PartialEq + Clone + Send + Sync + 'static,
    R: 'static,
{
    type Value = T;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Atomic
    }

    fn process(&self, value: &mut T) -> Result<(), ValidationError> {
        if *value == T::default() {
            if self.required {
                return Err(ListError::required().into());
            }
            if self.omit_empty {
                return Ok(());
            }
            if let Some(default) = &self.default {
                value.clone_from(default);
            }
        }

        let mut errors = ListError::new();
        (self.convert)(&*value, &mut |converted: &R| {
            for test in &self.tests {
                if let Some(error) = test.run(converted) {
                    errors.push(error.clone());
                }
            }
        })
        .map_err(|e| ListError::single(e.to_string()))?;

        errors.into_result()
    }

    fn is_required(&self) -> bool {
        AtomicSchema::is_required(self)
    }
}

impl<T: Clone, R> Clone for AtomicSchema<T, R> {
    fn clone(&self) -> Self {
        Self {
            required: self.required,
            omit_empty: self.omit_empty,
            default: self.default.clone(),
            convert: self.convert.clone(),
            tests: self.tests.clone(),
        }
    }
}

impl<T: fmt::Debug, R> fmt::Debug for AtomicSchema<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicSchema")
            .field("required", &self.required)
            .field("omit_empty", &self.omit_empty)
            .field("default", &self.default)
            .field("tests", &self.tests)
            .finish_non_exhaustive()
    }
}
