//! Error types for the payment record service.

use crate::domain::PaymentId;

/// Domain-level errors (invalid values and rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown payment status: {0}")]
    UnknownStatus(String),

    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    /// A referenced row did not exist when the write was attempted.
    #[error("Entity not found")]
    NotFound,

    /// Storage refused the write because another row still references this one.
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

/// Errors returned by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found! Id: {0}")]
    NotFound(PaymentId),

    #[error("{0}")]
    IntegrityViolation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Any other storage failure, passed through untouched.
    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl AppError {
    pub const INTEGRITY_FAILURE: &'static str = "referential integrity failure";

    pub fn integrity_violation() -> Self {
        AppError::IntegrityViolation(Self::INTEGRITY_FAILURE.into())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
