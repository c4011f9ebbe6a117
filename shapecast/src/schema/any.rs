//! Type-erased schema handle.
//!
//! Record field maps hold schemas over different value types side by side.
//! [`AnySchema`] keeps the value type's identity so the pairing with a field
//! (or an inner position) can be checked once, when the outer schema is built.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use super::{FieldMap, Introspect, Schema, SchemaKind, SharedSchema};
use crate::errors::BuildError;
use crate::reflect::FieldMeta;
use crate::violations::{ListError, ValidationError};

type Runner = Arc<dyn Fn(&mut dyn Any) -> Result<(), ValidationError> + Send + Sync>;

/// A schema whose value type is only known at runtime.
#[derive(Clone)]
pub struct AnySchema {
    kind: SchemaKind,
    required: bool,
    type_id: TypeId,
    type_name: &'static str,
    schema: Arc<dyn Any + Send + Sync>,
    structure: Arc<dyn Introspect>,
    run: Runner,
}

impl AnySchema {
    /// Erases the value type of `schema`.
    pub fn new<S>(schema: S) -> Self
    where
        S: Schema + 'static,
        S::Value: 'static,
    {
        let shared: SharedSchema<S::Value> = Arc::new(schema);
        Self::from_shared(shared)
    }

    /// Erases an already shared schema.
    pub fn from_shared<T: 'static>(schema: SharedSchema<T>) -> Self {
        let runner = Arc::clone(&schema);
        let run: Runner = Arc::new(move |value: &mut dyn Any| {
            match value.downcast_mut::<T>() {
                Some(value) => runner.process(value),
                None => {
                    tracing::error!(
                        expected = type_name::<T>(),
                        "field accessor returned a value of another type"
                    );
                    Err(ListError::single(format!("expected a value of type {}", type_name::<T>())).into())
                }
            }
        });

        Self {
            kind: schema.kind(),
            required: schema.is_required(),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            structure: Arc::new(Arc::clone(&schema)),
            schema: Arc::new(schema),
            run,
        }
    }

    /// Which kind of schema is erased.
    #[must_use]
    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Whether the erased schema rejects missing values.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Name of the processed type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the erased schema processes values of type `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Recovers the typed schema.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::TypeMismatch`] if the erased schema does not
    /// process `T`.
    pub fn downcast<T: 'static>(&self, context: &str) -> Result<SharedSchema<T>, BuildError> {
        self.schema
            .downcast_ref::<SharedSchema<T>>()
            .cloned()
            .ok_or_else(|| BuildError::type_mismatch(context, type_name::<T>(), self.type_name))
    }

    /// A copy with required-ness set to `required`.
    ///
    /// For atomic schemas this also sets `omit_empty` to `!required`.
    ///
    /// # Errors
    ///
    /// [`BuildError::Unsupported`] for sequence and record schemas.
    pub fn with_required(&self, required: bool) -> Result<Self, BuildError> {
        self.structure
            .required_variant(required)
            .ok_or_else(|| BuildError::unsupported(self.kind, "with_required"))
    }

    /// The wrapped schema of an optional or sequence schema.
    #[must_use]
    pub fn inner(&self) -> Option<Self> {
        self.structure.inner_schema()
    }

    /// A copy of an optional or sequence schema wrapping `inner`.
    ///
    /// # Errors
    ///
    /// [`BuildError::TypeMismatch`] if `inner` processes another type,
    /// [`BuildError::Unsupported`] for atomic and record schemas.
    pub fn with_inner(&self, inner: &Self) -> Result<Self, BuildError> {
        self.structure
            .inner_variant(inner)
            .unwrap_or_else(|| Err(BuildError::unsupported(self.kind, "with_inner")))
    }

    /// The field mapping of a record schema.
    #[must_use]
    pub fn fields(&self) -> Option<&FieldMap> {
        self.structure.field_map()
    }

    /// Field metadata of a record schema's type.
    #[must_use]
    pub fn meta(&self) -> Option<&[FieldMeta]> {
        self.structure.field_meta_list()
    }

    /// A copy of a record schema with its field mapping replaced.
    ///
    /// # Errors
    ///
    /// Same as [`RecordSchema::new`](super::RecordSchema::new), or
    /// [`BuildError::Unsupported`] for other kinds.
    pub fn with_fields(&self, fields: FieldMap) -> Result<Self, BuildError> {
        self.structure
            .fields_variant(fields)
            .unwrap_or_else(|| Err(BuildError::unsupported(self.kind, "with_fields")))
    }

    /// Processes a value whose type is only known at runtime.
    ///
    /// A value of the wrong type is reported as a single violation.
    pub fn process_any(&self, value: &mut dyn Any) -> Result<(), ValidationError> {
        (self.run)(value)
    }
}

impl fmt::Debug for AnySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnySchema")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
