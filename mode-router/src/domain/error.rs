//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! raised when values are constructed, so a search never sees invalid data.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Cost is negative, NaN or infinite
    #[error("invalid cost {value}: must be finite and non-negative")]
    InvalidCost { value: f64 },

    /// Mode label is empty after trimming
    #[error("invalid mode: label must not be empty")]
    InvalidMode,
}
