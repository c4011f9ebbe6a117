//! Tests over text.

use regex::Regex;
use std::net::IpAddr;
use url::Url;

use crate::schema::Test;

/// Requires at least `length` characters (not bytes).
#[must_use]
pub fn min_len(length: usize) -> Test<String> {
    Test::new(
        format!("must be at least {length} characters long"),
        move |v: &String| v.chars().count() >= length,
    )
}

/// Allows at most `length` characters (not bytes).
#[must_use]
pub fn max_len(length: usize) -> Test<String> {
    Test::new(
        format!("must be at most {length} characters long"),
        move |v: &String| v.chars().count() <= length,
    )
}

/// Requires a match of `regex` somewhere in the text.
#[must_use]
pub fn regex(regex: Regex) -> Test<String> {
    Test::new(format!("must match regex {}", regex.as_str()), move |v: &String| {
        regex.is_match(v)
    })
}

/// Requires an absolute URL with a host.
#[must_use]
pub fn url() -> Test<String> {
    Test::new("invalid URL", |v: &String| {
        Url::parse(v).is_ok_and(|u| u.host_str().is_some_and(|h| !h.is_empty()))
    })
}

/// Requires an IPv4 or IPv6 address.
#[must_use]
pub fn ip() -> Test<String> {
    Test::new("invalid IP address", |v: &String| v.parse::<IpAddr>().is_ok())
}
