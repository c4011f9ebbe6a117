//! Schemas for structs with named fields.

use serde::de::DeserializeOwned;
use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::{AnySchema, FieldMap, Introspect, Schema, SchemaKind};
use crate::config::CastOptions;
use crate::errors::{BuildError, CastError};
use crate::reflect::{FieldMeta, Record, Scrub};
use crate::violations::{ListError, MapError, ValidationError};

/// A configured field, resolved against the record's metadata.
#[derive(Debug, Clone)]
struct Entry {
    name: &'static str,
    tag: &'static str,
    schema: AnySchema,
}

/// Processes the named fields of a [`Record`] type.
///
/// Fields without a configured schema are left untouched. Failures are keyed
/// by the field's external name (its `serde` rename, or the field name).
///
/// ```rust
/// use shapecast::prelude::*;
/// use shapecast::predicates::ints;
///
/// #[derive(Record)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// let schema = record::<Person>(
///     FieldMap::new()
///         .with("name", text().required())
///         .with("age", int().test(ints::min(0))),
/// )
/// .unwrap();
///
/// let mut person = Person { name: String::new(), age: -1 };
/// let err = schema.process(&mut person).unwrap_err();
/// assert_eq!(err.to_string(), r#"{"age":["must be 0 minimum"],"name":["required"]}"#);
/// ```
pub struct RecordSchema<R> {
    fields: FieldMap,
    meta: Vec<FieldMeta>,
    entries: Vec<Entry>,
    _marker: PhantomData<fn() -> R>,
}

/// Builds a record schema from a field mapping.
///
/// # Errors
///
/// See [`RecordSchema::new`].
pub fn record<R: Record>(fields: FieldMap) -> Result<RecordSchema<R>, BuildError> {
    RecordSchema::new(fields)
}

impl<R: Record> RecordSchema<R> {
    /// Builds a record schema, checking every configured field against `R`.
    ///
    /// # Errors
    ///
    /// - [`BuildError::UnknownField`] if a name is not a field of `R`
    /// - [`BuildError::TypeMismatch`] if a schema does not process the
    ///   field's declared type
    /// - [`BuildError::DuplicateTag`] if two configured fields share an
    ///   external name
    pub fn new(fields: FieldMap) -> Result<Self, BuildError> {
        let schema_name = format!("RecordSchema<{}>", type_name::<R>());
        let meta = R::fields();

        let mut entries = Vec::with_capacity(fields.len());
        let mut tags: HashMap<&'static str, &'static str> = HashMap::new();
        for (name, schema) in fields.iter() {
            let field = meta
                .iter()
                .find(|m| m.name == name)
                .ok_or_else(|| BuildError::unknown_field(&schema_name, name))?;

            if field.type_id() != schema.type_id() {
                return Err(BuildError::type_mismatch(
                    format!("{schema_name}: {name}"),
                    field.type_name,
                    schema.type_name(),
                ));
            }

            if let Some(first) = tags.insert(field.tag, field.name) {
                return Err(BuildError::DuplicateTag {
                    schema: schema_name,
                    tag: field.tag.to_string(),
                    first: first.to_string(),
                    second: field.name.to_string(),
                });
            }

            entries.push(Entry {
                name: field.name,
                tag: field.tag,
                schema: schema.clone(),
            });
        }

        tracing::debug!(
            record = type_name::<R>(),
            fields = entries.len(),
            "record schema built"
        );

        Ok(Self {
            fields,
            meta,
            entries,
            _marker: PhantomData,
        })
    }

    /// Returns a new schema with `more` merged in; entries of `more`
    /// replace existing ones with the same name.
    ///
    /// # Errors
    ///
    /// Same as [`RecordSchema::new`].
    pub fn extend(&self, more: FieldMap) -> Result<Self, BuildError> {
        Self::new(self.fields.clone().merge(more))
    }

    /// Returns a new schema with the mapping replaced.
    ///
    /// # Errors
    ///
    /// Same as [`RecordSchema::new`].
    pub fn with_fields(&self, fields: FieldMap) -> Result<Self, BuildError> {
        Self::new(fields)
    }

    /// The configured field mapping.
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Metadata of every field of `R`, configured or not.
    #[must_use]
    pub fn meta(&self) -> &[FieldMeta] {
        &self.meta
    }

    /// Metadata of the field called `name`.
    #[must_use]
    pub fn field_meta(&self, name: &str) -> Option<&FieldMeta> {
        self.meta.iter().find(|m| m.name == name)
    }

    /// Decodes `src` with `decode`, optionally scrubs it, then processes it.
    ///
    /// `R` must implement [`Scrub`] whether or not scrubbing is enabled. With
    /// `#[derive(Scrub)]` every field type needs an impl too; mark fields of
    /// foreign types `#[shapecast(skip_scrub)]`, or enable the `uuid` feature
    /// for `uuid::Uuid`.
    ///
    /// # Errors
    ///
    /// [`CastError::Decode`] if decoding fails, [`CastError::Invalid`] if the
    /// decoded value does not pass the schema.
    pub fn cast<D, E>(&self, src: &[u8], decode: D, options: &CastOptions) -> Result<R, CastError>
    where
        R: Scrub,
        D: FnOnce(&[u8]) -> Result<R, E>,
        E: Into<anyhow::Error>,
    {
        let mut value = decode(src).map_err(|e| {
            let err: anyhow::Error = e.into();
            tracing::debug!(record = type_name::<R>(), error = %err, "decode failed");
            CastError::decode(type_name::<R>(), err)
        })?;

        if options.scrub {
            value.scrub();
        }

        self.process(&mut value)?;
        Ok(value)
    }

    /// [`cast`](Self::cast) with JSON decoding.
    ///
    /// # Errors
    ///
    /// Same as [`RecordSchema::cast`].
    pub fn cast_json(&self, src: &[u8], options: &CastOptions) -> Result<R, CastError>
    where
        R: Scrub + DeserializeOwned,
    {
        self.cast(src, |bytes: &[u8]| serde_json::from_slice::<R>(bytes), options)
    }
}

impl<R: Record> Introspect for RecordSchema<R> {
    fn field_map(&self) -> Option<&FieldMap> {
        Some(&self.fields)
    }

    fn field_meta_list(&self) -> Option<&[FieldMeta]> {
        Some(&self.meta)
    }

    fn fields_variant(&self, fields: FieldMap) -> Option<Result<AnySchema, BuildError>> {
        Some(self.with_fields(fields).map(AnySchema::new))
    }
}

impl<R: Record> Schema for RecordSchema<R> {
    type Value = R;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Record
    }

    fn process(&self, value: &mut R) -> Result<(), ValidationError> {
        let mut errors = MapError::new();
        for entry in &self.entries {
            let result = match value.field_mut(entry.name) {
                Some(slot) => entry.schema.process_any(slot),
                None => {
                    tracing::error!(
                        record = type_name::<R>(),
                        field = entry.name,
                        "record does not expose a field it declares"
                    );
                    Err(ListError::single(format!("field {} is not accessible", entry.name)).into())
                }
            };
            errors.add(entry.tag, result.err());
        }

        let result = errors.into_result();
        if let Err(err) = &result {
            tracing::trace!(
                record = type_name::<R>(),
                violations = err.violation_count(),
                "record failed validation"
            );
        }
        result
    }
}

impl<R> Clone for RecordSchema<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            meta: self.meta.clone(),
            entries: self.entries.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R> fmt::Debug for RecordSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("record", &type_name::<R>())
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
