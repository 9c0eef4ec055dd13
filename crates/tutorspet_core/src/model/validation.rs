//! Validation failure shared by all value objects.

use thiserror::Error;

/// Raised when a raw field value does not satisfy its value-object constraint.
///
/// Always recoverable: callers re-prompt with `constraint` as guidance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} `{value}`: {constraint}")]
pub struct ValidationError {
    /// Field label, e.g. `phone`.
    pub field: &'static str,
    /// Offending input after trimming.
    pub value: String,
    /// Human-readable constraint description.
    pub constraint: &'static str,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, value: impl Into<String>, constraint: &'static str) -> Self {
        Self {
            field,
            value: value.into(),
            constraint,
        }
    }
}
