//! Domain error model.

use thiserror::Error;

/// Result type used across the schema and API layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic request failures only (bad input, missing records). Storage
/// failures live in `masterpiece_infra::StoreError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation. The message names the field and the constraint.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Validation failure scoped to a single field, rendered as `field: reason`.
    pub fn field(field: &str, reason: impl core::fmt::Display) -> Self {
        Self::Validation(format!("{field}: {reason}"))
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_names_the_field() {
        let err = DomainError::field("rating", "must be between 1 and 5");
        assert_eq!(err, DomainError::Validation("rating: must be between 1 and 5".to_string()));
        assert_eq!(err.to_string(), "validation failed: rating: must be between 1 and 5");
    }
}
