//! Schema kinds and their shared processing contract.
//!
//! Four kinds of schema nest inside each other:
//! - [`AtomicSchema`]: converts and checks a single scalar-like value
//! - [`OptionalSchema`]: adds an "absent" state around an inner schema
//! - [`SequenceSchema`]: checks a whole `Vec` and then every element
//! - [`RecordSchema`]: checks named fields of a [`Record`](crate::Record) type
//!
//! Schemas are built once and then shared; every configuration method
//! consumes the schema and returns a reconfigured value.

mod any;
mod atomic;
mod convert;
mod fields;
mod introspect;
mod optional;
mod record;
mod sequence;

#[cfg(test)]
mod integration_tests;

pub use any::AnySchema;
pub use atomic::{
    atomic, atomic_from, float, float_from, int, int_from, text, text_from, AtomicSchema,
};
pub use convert::{ConversionError, ToFloat};
pub use fields::FieldMap;
pub use introspect::Introspect;
pub use optional::{optional, OptionalSchema};
pub use record::{record, RecordSchema};
pub use sequence::{sequence, SequenceSchema};
pub use test::Test;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::violations::ValidationError;

/// The closed set of schema kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// A single scalar-like value.
    Atomic,
    /// A value that may be absent.
    Optional,
    /// An ordered collection.
    Sequence,
    /// A value with named fields.
    Record,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic => write!(f, "atomic"),
            Self::Optional => write!(f, "optional"),
            Self::Sequence => write!(f, "sequence"),
            Self::Record => write!(f, "record"),
        }
    }
}

/// The contract shared by every schema kind.
///
/// `process` borrows the value for the duration of the call and may write to
/// it in place (defaults). It returns `Ok(())` or an error holding every
/// violation found in its scope.
pub trait Schema: Introspect + Send + Sync {
    /// The type of value this schema processes.
    type Value;

    /// Which kind of schema this is.
    fn kind(&self) -> SchemaKind;

    /// Validates (and possibly normalizes) `value`.
    fn process(&self, value: &mut Self::Value) -> Result<(), ValidationError>;

    /// Whether a missing value is rejected.
    fn is_required(&self) -> bool {
        false
    }

    /// Name of the processed type, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self::Value>()
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    type Value = S::Value;

    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }

    fn process(&self, value: &mut Self::Value) -> Result<(), ValidationError> {
        (**self).process(value)
    }

    fn is_required(&self) -> bool {
        (**self).is_required()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

/// A shared, type-checked handle to a schema over `T`.
pub type SharedSchema<T> = Arc<dyn Schema<Value = T>>;

impl<T> fmt::Debug for dyn Schema<Value = T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &self.kind())
            .field("type_name", &self.type_name())
            .field("required", &self.is_required())
            .finish()
    }
}
