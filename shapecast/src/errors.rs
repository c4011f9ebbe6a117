//! Error types for building schemas and casting raw input.
//!
//! Data failures found while processing a value are reported through
//! [`ValidationError`](crate::violations::ValidationError). The types here
//! cover the two other categories:
//! - [`BuildError`]: a schema was wired incorrectly (a programming error)
//! - [`CastError`]: raw bytes could not be decoded, or decoded but invalid

use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

use crate::schema::SchemaKind;
use crate::violations::ValidationError;

/// A schema could not be built.
///
/// These are configuration mistakes, surfaced once when the schema is built
/// rather than while processing data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A field schema names a field the record type does not have.
    #[error("{schema}: missing record field: {field}")]
    UnknownField {
        /// The schema being built.
        schema: String,
        /// The unknown field name.
        field: String,
    },

    /// A schema's value type differs from the type it has to process.
    #[error(
        "{context}: schema must have inner type {expected}, got {found}. \
         Probably you'd like to use a converting atomic schema (e.g. `int_from::<T>()`)"
    )]
    TypeMismatch {
        /// Where the mismatch was found.
        context: String,
        /// The type the position requires.
        expected: &'static str,
        /// The type the supplied schema processes.
        found: &'static str,
    },

    /// Two configured fields report their errors under the same external name.
    #[error("{schema}: fields `{first}` and `{second}` share the external name `{tag}`")]
    DuplicateTag {
        /// The schema being built.
        schema: String,
        /// The external name.
        tag: String,
        /// First field using it.
        first: String,
        /// Second field using it.
        second: String,
    },

    /// A structural operation was asked of a schema kind that has no such part.
    #[error("{kind} schema does not support {operation}")]
    Unsupported {
        /// Kind of the schema asked.
        kind: SchemaKind,
        /// The operation requested.
        operation: &'static str,
    },
}

impl BuildError {
    /// Creates an unknown field error.
    #[must_use]
    pub fn unknown_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            schema: schema.into(),
            field: field.into(),
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(
        context: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    /// Creates an unsupported operation error.
    #[must_use]
    pub fn unsupported(kind: SchemaKind, operation: &'static str) -> Self {
        Self::Unsupported { kind, operation }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::UnknownField { schema, field } => {
                map.insert("type".to_string(), json!("UnknownField"));
                map.insert("schema".to_string(), json!(schema));
                map.insert("field".to_string(), json!(field));
            }
            Self::TypeMismatch {
                context,
                expected,
                found,
            } => {
                map.insert("type".to_string(), json!("TypeMismatch"));
                map.insert("context".to_string(), json!(context));
                map.insert("expected".to_string(), json!(expected));
                map.insert("found".to_string(), json!(found));
            }
            Self::DuplicateTag {
                schema,
                tag,
                first,
                second,
            } => {
                map.insert("type".to_string(), json!("DuplicateTag"));
                map.insert("schema".to_string(), json!(schema));
                map.insert("tag".to_string(), json!(tag));
                map.insert("fields".to_string(), json!([first, second]));
            }
            Self::Unsupported { kind, operation } => {
                map.insert("type".to_string(), json!("Unsupported"));
                map.insert("kind".to_string(), json!(kind));
                map.insert("operation".to_string(), json!(operation));
            }
        }

        map.insert("message".to_string(), json!(self.to_string()));
        map
    }
}

/// Decoding raw input into a record and validating it failed.
#[derive(Debug, Error)]
pub enum CastError {
    /// The input was not well-formed enough to produce a typed value.
    #[error("deserialize into {type_name}: {source}")]
    Decode {
        /// The target type.
        type_name: &'static str,
        /// The decoder's error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The decoded value failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl CastError {
    /// Wraps a decoder failure.
    #[must_use]
    pub fn decode(type_name: &'static str, source: anyhow::Error) -> Self {
        Self::Decode {
            type_name,
            source: source.into(),
        }
    }

    /// Returns the validation failure, if decoding succeeded.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Decode { .. } => None,
        }
    }

    /// Whether the input could not be decoded at all.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violations::ListError;

    #[test]
    fn test_type_mismatch_message() {
        let err = BuildError::type_mismatch("SequenceSchema<String>", "alloc::string::String", "i64");
        let msg = err.to_string();
        assert!(msg.starts_with("SequenceSchema<String>: schema must have inner type"));
        assert!(msg.contains("got i64"));
    }

    #[test]
    fn test_build_error_to_dict() {
        let err = BuildError::unknown_field("RecordSchema<User>", "nickname");
        let dict = err.to_dict();

        assert_eq!(dict.get("type").unwrap(), "UnknownField");
        assert_eq!(dict.get("field").unwrap(), "nickname");
        assert_eq!(
            dict.get("message").unwrap(),
            "RecordSchema<User>: missing record field: nickname"
        );
    }

    #[test]
    fn test_unsupported_message() {
        let err = BuildError::unsupported(SchemaKind::Record, "with_required");
        assert_eq!(err.to_string(), "record schema does not support with_required");
        assert_eq!(err.to_dict().get("kind").unwrap(), "record");
    }

    #[test]
    fn test_cast_error_categories() {
        let err = CastError::decode("User", anyhow::anyhow!("expected value at line 1"));
        assert!(err.is_decode());
        assert!(err.validation().is_none());
        assert_eq!(err.to_string(), "deserialize into User: expected value at line 1");

        let err = CastError::from(ValidationError::from(ListError::required()));
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), r#"["required"]"#);
    }
}
