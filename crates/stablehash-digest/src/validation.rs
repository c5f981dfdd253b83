use thiserror::Error;

/// Validation errors for digest primitives.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a digest text form has the wrong length for its algorithm.
    #[error("{field} has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Expected length in characters.
        expected: usize,
        /// Actual length in characters.
        actual: usize,
    },
}
