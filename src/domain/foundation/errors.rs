//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur while constructing domain values from raw model data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Dimension mismatch in '{field}': expected {expected}, got {actual}")]
    DimensionMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Creates a dimension mismatch validation error.
    pub fn dimension_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        ValidationError::DimensionMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}
