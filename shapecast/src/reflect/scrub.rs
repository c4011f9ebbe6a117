//! Normalizing blank text to absence.
//!
//! Decoded payloads often carry `""` where the sender meant "not provided".
//! Scrubbing turns every `Some("")` reachable from a value into `None`, so
//! optional schemas see an absent value instead of an empty one.

use std::collections::{BTreeMap, HashMap, VecDeque};

/// Recursively replaces blank optional text with `None`.
///
/// `is_blank` marks the leaves that count as blank (empty `String`s by
/// default); `scrub` walks into containers. Derive it for records with
/// `#[derive(Scrub)]`.
pub trait Scrub {
    /// Walks into the value, scrubbing everything it contains.
    fn scrub(&mut self) {}

    /// Whether the value is blank text.
    fn is_blank(&self) -> bool {
        false
    }
}

/// Replaces `Some("")` with `None`.
pub fn scrub_string<S: AsRef<str>>(value: &mut Option<S>) {
    if value.as_ref().is_some_and(|s| s.as_ref().is_empty()) {
        *value = None;
    }
}

impl Scrub for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Scrub> Scrub for Option<T> {
    fn scrub(&mut self) {
        if self.as_ref().is_some_and(Scrub::is_blank) {
            *self = None;
        } else if let Some(inner) = self {
            inner.scrub();
        }
    }
}

impl<T: Scrub + ?Sized> Scrub for Box<T> {
    fn scrub(&mut self) {
        (**self).scrub();
    }

    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Scrub> Scrub for Vec<T> {
    fn scrub(&mut self) {
        self.iter_mut().for_each(Scrub::scrub);
    }
}

impl<T: Scrub> Scrub for VecDeque<T> {
    fn scrub(&mut self) {
        self.iter_mut().for_each(Scrub::scrub);
    }
}

impl<T: Scrub, const N: usize> Scrub for [T; N] {
    fn scrub(&mut self) {
        self.iter_mut().for_each(Scrub::scrub);
    }
}

impl<K, V: Scrub, S> Scrub for HashMap<K, V, S> {
    fn scrub(&mut self) {
        self.values_mut().for_each(Scrub::scrub);
    }
}

impl<K, V: Scrub> Scrub for BTreeMap<K, V> {
    fn scrub(&mut self) {
        self.values_mut().for_each(Scrub::scrub);
    }
}

impl Scrub for serde_json::Value {
    fn scrub(&mut self) {
        match self {
            Self::String(s) if s.is_empty() => *self = Self::Null,
            Self::Array(items) => items.iter_mut().for_each(Scrub::scrub),
            Self::Object(entries) => entries.values_mut().for_each(Scrub::scrub),
            _ => {}
        }
    }
}

macro_rules! scrub_leaf {
    ($($ty:ty),* $(,)?) => {
        $(impl Scrub for $ty {})*
    };
}

scrub_leaf!(
    bool, char, (), i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    std::net::IpAddr, std::net::Ipv4Addr, std::net::Ipv6Addr, std::time::Duration,
    serde_json::Number,
);

#[cfg(feature = "uuid")]
scrub_leaf!(uuid::Uuid);
