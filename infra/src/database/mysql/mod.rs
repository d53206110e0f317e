//! MySQL implementations of the `pn_core` repository traits

pub mod area_repository_impl;
pub mod country_repository_impl;
pub mod phone_number_repository_impl;
pub mod verification_repository_impl;

pub use area_repository_impl::MySqlAreaRepository;
pub use country_repository_impl::MySqlCountryRepository;
pub use phone_number_repository_impl::MySqlPhoneNumberRepository;
pub use verification_repository_impl::MySqlVerificationRepository;

use pn_core::errors::DomainError;

/// Storage failure with the operation that hit it
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(event = "db_error", context = context, error = %err, "Database operation failed");
    DomainError::Database {
        message: format!("{}: {}", context, err),
    }
}

/// Column decoding failure
pub(crate) fn column_error(column: &str, err: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, err),
    }
}
