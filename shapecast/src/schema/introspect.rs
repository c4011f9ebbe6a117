//! Structural access for tooling that walks or rewrites schemas.

use std::sync::Arc;

use super::{AnySchema, FieldMap};
use crate::errors::BuildError;
use crate::reflect::FieldMeta;

/// Exposes a schema's structure without knowing its concrete type.
///
/// Every [`Schema`](super::Schema) implements this. Each method answers
/// `None` when the schema kind has no such part, which is what the defaults
/// do, so leaf schemas only need `impl Introspect for MySchema {}`.
///
/// Use it through [`AnySchema`], which turns `None` into typed errors.
pub trait Introspect: Send + Sync {
    /// A copy with required-ness set to `required` (atomic and optional).
    fn required_variant(&self, _required: bool) -> Option<AnySchema> {
        None
    }

    /// The wrapped schema (optional and sequence).
    fn inner_schema(&self) -> Option<AnySchema> {
        None
    }

    /// A copy wrapping `inner` instead (optional and sequence).
    fn inner_variant(&self, _inner: &AnySchema) -> Option<Result<AnySchema, BuildError>> {
        None
    }

    /// The configured field mapping (record).
    fn field_map(&self) -> Option<&FieldMap> {
        None
    }

    /// Metadata of every field of the record type (record).
    fn field_meta_list(&self) -> Option<&[FieldMeta]> {
        None
    }

    /// A copy with the field mapping replaced (record).
    fn fields_variant(&self, _fields: FieldMap) -> Option<Result<AnySchema, BuildError>> {
        None
    }
}

impl<S: Introspect + ?Sized> Introspect for Arc<S> {
    fn required_variant(&self, required: bool) -> Option<AnySchema> {
        (**self).required_variant(required)
    }

    fn inner_schema(&self) -> Option<AnySchema> {
        (**self).inner_schema()
    }

    fn inner_variant(&self, inner: &AnySchema) -> Option<Result<AnySchema, BuildError>> {
        (**self).inner_variant(inner)
    }

    fn field_map(&self) -> Option<&FieldMap> {
        (**self).field_map()
    }

    fn field_meta_list(&self) -> Option<&[FieldMeta]> {
        (**self).field_meta_list()
    }

    fn fields_variant(&self, fields: FieldMap) -> Option<Result<AnySchema, BuildError>> {
        (**self).fields_variant(fields)
    }
}
