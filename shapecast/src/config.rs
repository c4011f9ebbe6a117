//! Configuration for decode-then-validate entry points.

use serde::{Deserialize, Serialize};

/// Options for [`RecordSchema::cast`](crate::RecordSchema::cast).
///
/// Deserializable so hosts can keep it next to the rest of their settings:
///
/// ```rust
/// let options: shapecast::CastOptions = serde_json::from_str(r#"{"scrub": true}"#).unwrap();
/// assert!(options.scrub);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastOptions {
    /// Replace blank optional text with `None` before validating.
    pub scrub: bool,
}

impl CastOptions {
    /// Creates options with defaults (no scrubbing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables scrubbing.
    #[must_use]
    pub fn scrub(mut self) -> Self {
        self.scrub = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(!CastOptions::new().scrub);
        assert!(CastOptions::new().scrub().scrub);

        let parsed: CastOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, CastOptions::default());
    }
}
