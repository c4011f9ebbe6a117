//! Tests over whole sequences.

use std::collections::HashSet;
use std::hash::Hash;

use crate::schema::Test;

/// Requires at least `length` items.
#[must_use]
pub fn min_len<T: 'static>(length: usize) -> Test<[T]> {
    Test::new(
        format!("must contain at least {length} items"),
        move |v: &[T]| v.len() >= length,
    )
}

/// Allows at most `length` items.
#[must_use]
pub fn max_len<T: 'static>(length: usize) -> Test<[T]> {
    Test::new(
        format!("must contain at most {length} items"),
        move |v: &[T]| v.len() <= length,
    )
}

/// Requires every item to be distinct.
#[must_use]
pub fn unique<T: Hash + Eq + 'static>() -> Test<[T]> {
    Test::new("items must be unique", |v: &[T]| {
        let mut seen = HashSet::with_capacity(v.len());
        v.iter().all(|item| seen.insert(item))
    })
}

/// Requires `key` to be distinct across items.
#[must_use]
pub fn unique_by<T, K, F>(key: F) -> Test<[T]>
where
    T: 'static,
    K: Hash + Eq,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    Test::new("items must be unique", move |v: &[T]| {
        let mut seen = HashSet::with_capacity(v.len());
        v.iter().all(|item| seen.insert(key(item)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert!(min_len::<i64>(2).run(&[1, 2]).is_none());
        assert!(min_len::<i64>(2).run(&[1]).is_some());
        assert!(max_len::<i64>(1).run(&[]).is_none());
        assert_eq!(
            max_len::<i64>(1).run(&[1, 2]).map(|v| v.as_str()),
            Some("must contain at most 1 items")
        );
    }

    #[test]
    fn test_unique() {
        assert!(unique::<i64>().run(&[1, 2, 3]).is_none());
        assert!(unique::<i64>().run(&[1, 2, 1]).is_some());
        assert!(unique::<String>().run(&[]).is_none());
    }

    #[test]
    fn test_unique_by_key() {
        let test = unique_by(|s: &String| s.to_lowercase());
        assert!(test.run(&["a".to_string(), "b".to_string()]).is_none());
        assert_eq!(
            test.run(&["a".to_string(), "A".to_string()]).map(|v| v.as_str()),
            Some("items must be unique")
        );
    }
}
