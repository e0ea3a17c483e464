// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Field-level validation failure produced by value objects and draft inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("immutable field violation: {0}")]
    ImmutableFieldViolation(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("transaction aborted: {0}")]
    TransactionAborted(String),
    #[error("operation cancelled: {0}")]
    Cancelled(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ValidationFailed(ValidationError::new(field, reason))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field_and_reason() {
        let err: DomainError = ValidationError::new("title", "too short").into();
        assert_eq!(err.to_string(), "validation failed: title: too short");
    }

    #[test]
    fn not_found_helper() {
        let err = DomainError::not_found("article not found");
        assert!(err.is_not_found());
        assert!(!DomainError::DuplicateKey("x".into()).is_not_found());
    }
}
