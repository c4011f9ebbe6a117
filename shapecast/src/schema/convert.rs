//! Conversions applied by atomic schemas before their tests run.

use std::sync::Arc;
use thiserror::Error;

/// A conversion failed; the message becomes the single reported violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConversionError(String);

impl ConversionError {
    /// Creates a new conversion error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Converts a `T` and hands the converted `R` to a visitor.
///
/// Passing the result to a visitor lets the identity conversion lend the
/// input itself instead of cloning it.
pub(crate) type Converter<T, R> =
    Arc<dyn Fn(&T, &mut dyn FnMut(&R)) -> Result<(), ConversionError> + Send + Sync>;

pub(crate) fn identity<T>(value: &T, visit: &mut dyn FnMut(&T)) -> Result<(), ConversionError> {
    visit(value);
    Ok(())
}

pub(crate) fn owned<T, R, E, F>(convert: F) -> Converter<T, R>
where
    T: 'static,
    R: 'static,
    E: std::fmt::Display + 'static,
    F: Fn(&T) -> Result<R, E> + Send + Sync + 'static,
{
    Arc::new(move |value: &T, visit: &mut dyn FnMut(&R)| {
        let converted = convert(value).map_err(|e| ConversionError::new(e.to_string()))?;
        visit(&converted);
        Ok(())
    })
}

/// Types that can be read as a canonical `f64`.
///
/// Covers native floats, decimal text (parsed strictly, no surrounding
/// whitespace) and JSON numbers.
pub trait ToFloat {
    /// Reads the value as `f64`, or `None` if it is not a representable number.
    fn to_float(&self) -> Option<f64>;
}

impl ToFloat for f64 {
    fn to_float(&self) -> Option<f64> {
        Some(*self)
    }
}

impl ToFloat for f32 {
    fn to_float(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl ToFloat for String {
    fn to_float(&self) -> Option<f64> {
        self.parse::<f64>().ok().filter(|f| f.is_finite())
    }
}

impl ToFloat for serde_json::Number {
    fn to_float(&self) -> Option<f64> {
        self.as_f64().filter(|f| f.is_finite())
    }
}

/// JSON numbers and numeric strings; every other JSON value is not a number.
impl ToFloat for serde_json::Value {
    fn to_float(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.to_float(),
            Self::String(s) => s.to_float(),
            _ => None,
        }
    }
}
