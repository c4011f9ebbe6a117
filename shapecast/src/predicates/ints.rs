//! Tests over integers.

use crate::schema::Test;

/// Requires the value to equal `value`.
#[must_use]
pub fn eq(value: i64) -> Test<i64> {
    Test::new(format!("must be equal to {value}"), move |v: &i64| *v == value)
}

/// Inclusive lower bound.
#[must_use]
pub fn min(value: i64) -> Test<i64> {
    Test::new(format!("must be {value} minimum"), move |v: &i64| *v >= value)
}

/// Inclusive upper bound.
#[must_use]
pub fn max(value: i64) -> Test<i64> {
    Test::new(format!("must be {value} maximum"), move |v: &i64| *v <= value)
}
