//! Field access by name for record types.
//!
//! Record schemas need to reach a struct's fields by name and know each
//! field's declared type and wire name. [`Record`] provides exactly that, and
//! is normally implemented with `#[derive(Record)]`:
//!
//! ```rust
//! use shapecast::Record;
//!
//! #[derive(Record)]
//! struct Signup {
//!     #[serde(rename = "user_name")]
//!     name: String,
//!     age: i64,
//! }
//!
//! let meta = Signup::fields();
//! assert_eq!(meta[0].tag, "user_name");
//! assert_eq!(meta[1].tag, "age");
//! ```

mod scrub;

pub use scrub::{scrub_string, Scrub};

use std::any::{type_name, Any, TypeId};

/// Describes one field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Position of the field in the declaration.
    pub index: usize,
    /// The Rust field name.
    pub name: &'static str,
    /// The external (wire) name errors are reported under.
    pub tag: &'static str,
    /// Name of the declared field type.
    pub type_name: &'static str,
    type_id: TypeId,
}

impl FieldMeta {
    /// Describes a field of type `F`.
    #[must_use]
    pub fn new<F: 'static>(index: usize, name: &'static str, tag: &'static str) -> Self {
        Self {
            index,
            name,
            tag,
            type_name: type_name::<F>(),
            type_id: TypeId::of::<F>(),
        }
    }

    /// Whether the field is declared with type `F`.
    #[must_use]
    pub fn is<F: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<F>()
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }
}

/// A struct whose fields can be reached by name.
///
/// Implementations must agree with themselves: `field_mut(name)` returns the
/// field described by the [`FieldMeta`] of the same name, with that type.
pub trait Record: 'static {
    /// Metadata for every field, in declaration order.
    fn fields() -> Vec<FieldMeta>;

    /// Mutable access to the field called `name`.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Any>;
}
