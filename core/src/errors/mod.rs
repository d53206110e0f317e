//! Domain-specific error types and error handling.

mod types;


pub use types::{DirectoryError, ErrorCategory, ValidationError, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Category used by callers to decide how to react
    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::Database { .. } | DomainError::Internal { .. } => ErrorCategory::Internal,
            DomainError::Validation(_) => ErrorCategory::InvalidArgument,
            DomainError::Directory(e) => e.category(),
            DomainError::Verification(e) => e.category(),
        }
    }

    /// Stable machine readable code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Database { .. } => "DATABASE_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Validation(e) => e.code(),
            DomainError::Directory(e) => e.code(),
            DomainError::Verification(e) => e.code(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
