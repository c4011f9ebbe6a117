//! Testing utilities for schemas.
//!
//! This module provides:
//! - Assertions over processing results and their wire form
//! - A one-call tracing subscriber for test runs

mod assertions;

pub use assertions::{assert_invalid, assert_valid, assert_violations};

/// Installs a `tracing` subscriber honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
