//! Ready-made [`Test`]s for common checks.
//!
//! Each function returns a test carrying the message it reports:
//!
//! ```rust
//! use shapecast::predicates::{ints, text};
//! use shapecast::{int, Schema};
//!
//! let age = int().tests([ints::min(0), ints::max(150)]);
//! assert_eq!(age.process(&mut 200).unwrap_err().to_string(), r#"["must be 150 maximum"]"#);
//!
//! assert!(text::ip().run(&"10.0.0.1".to_string()).is_none());
//! ```
//!
//! Checks that depend on external code tables (currencies, countries,
//! languages) are not shipped; build them with [`Test::new`].

pub mod floats;
pub mod ints;
pub mod seq;
pub mod text;

use std::fmt;

use crate::schema::Test;

/// Restricts a value to a fixed set of variants.
///
/// Reports `must be one of [a b]`.
#[must_use]
pub fn one_of<T, I>(variants: I) -> Test<T>
where
    T: PartialEq + fmt::Display + Send + Sync + 'static,
    I: IntoIterator<Item = T>,
{
    let variants: Vec<T> = variants.into_iter().collect();
    let listed = variants
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    Test::new(format!("must be one of [{listed}]"), move |v: &T| {
        variants.contains(v)
    })
}
