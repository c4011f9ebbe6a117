//! Tests over floats.

use crate::schema::Test;

/// Inclusive lower bound.
#[must_use]
pub fn min(value: f64) -> Test<f64> {
    Test::new(format!("must be {value} minimum"), move |v: &f64| *v >= value)
}

/// Inclusive upper bound.
#[must_use]
pub fn max(value: f64) -> Test<f64> {
    Test::new(format!("must be {value} maximum"), move |v: &f64| *v <= value)
}

/// Allows at most `digits` digits after the decimal point, as written by the
/// shortest decimal representation of the value.
#[must_use]
pub fn max_precision(digits: usize) -> Test<f64> {
    Test::new(
        format!("has more than {digits} precision digits"),
        move |v: &f64| fraction_digits(*v) <= digits,
    )
}

fn fraction_digits(value: f64) -> usize {
    let rendered = value.to_string();
    rendered.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(min(0.5).run(&0.5).is_none());
        assert!(min(0.5).run(&0.49).is_some());
        assert!(max(1.0).run(&1.5).is_some());
        assert_eq!(max(1.0).error().as_str(), "must be 1 maximum");
        assert_eq!(min(2.5).error().as_str(), "must be 2.5 minimum");
    }

    #[test]
    fn test_max_precision() {
        let test = max_precision(2);
        assert!(test.run(&10.0).is_none());
        assert!(test.run(&10.25).is_none());
        assert!(test.run(&10.125).is_some());
        assert_eq!(test.error().as_str(), "has more than 2 precision digits");

        assert_eq!(fraction_digits(-0.001), 3);
        assert_eq!(fraction_digits(1e21), 0);
    }
}
