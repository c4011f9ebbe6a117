//! # Shapecast
//!
//! Composable schemas that validate and coerce structured data.
//!
//! Shapecast provides:
//!
//! - **Atomic schemas**: required/default/omit-empty handling, conversion and tests for scalars
//! - **Optional schemas**: an "absent" state around any other schema
//! - **Sequence schemas**: whole-collection tests, then per-element processing
//! - **Record schemas**: per-field schemas for structs, checked against the struct when built
//! - **Structured errors**: failures nest exactly like the data and render as JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use shapecast::prelude::*;
//! use shapecast::predicates::{ints, text as texts};
//!
//! #[derive(Debug, Record, Scrub, serde::Deserialize)]
//! struct Signup {
//!     name: String,
//!     age: i64,
//!     website: Option<String>,
//! }
//!
//! let schema = record::<Signup>(
//!     FieldMap::new()
//!         .with("name", text().required())
//!         .with("age", int().test(ints::min(0)))
//!         .with("website", optional(text().test(texts::url()))),
//! )?;
//!
//! let err = schema
//!     .cast_json(br#"{"name": "", "age": -1}"#, &CastOptions::new())
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     r#"{"age":["must be 0 minimum"],"name":["required"]}"#
//! );
//! # Ok::<(), shapecast::BuildError>(())
//! ```
//!
//! Schemas are typed, so pairing a schema with a value of another type does
//! not compile:
//!
//! ```compile_fail
//! use shapecast::{int, sequence, SequenceSchema};
//!
//! let names: SequenceSchema<String> = sequence(int());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

#[cfg(test)]
extern crate self as shapecast;

pub mod config;
pub mod errors;
pub mod predicates;
pub mod reflect;
pub mod schema;
pub mod violations;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::CastOptions;
pub use errors::{BuildError, CastError};
pub use reflect::{scrub_string, FieldMeta, Record, Scrub};
pub use schema::{
    atomic, atomic_from, float, float_from, int, int_from, optional, record, sequence, text,
    text_from, AnySchema, AtomicSchema, ConversionError, FieldMap, Introspect, OptionalSchema,
    RecordSchema, Schema, SchemaKind, SequenceSchema, SharedSchema, Test, ToFloat,
};
pub use violations::{ListError, MapError, ValidationError, Violation, REQUIRED};

#[cfg(feature = "derive")]
pub use shapecast_derive::{Record, Scrub};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::CastOptions;
    pub use crate::errors::{BuildError, CastError};
    pub use crate::reflect::{Record, Scrub};
    pub use crate::schema::{
        atomic, atomic_from, float, float_from, int, int_from, optional, record, sequence, text,
        text_from, AnySchema, AtomicSchema, FieldMap, OptionalSchema, RecordSchema, Schema,
        SchemaKind, SequenceSchema, Test,
    };
    pub use crate::violations::{ListError, MapError, ValidationError, Violation};

    #[cfg(feature = "derive")]
    pub use shapecast_derive::{Record, Scrub};
}
