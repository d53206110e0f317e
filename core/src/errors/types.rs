//! Error types for directory lookups and the verification workflow
//!
//! Every error carries a stable code so callers can branch on it without
//! parsing messages.

use thiserror::Error;

/// Coarse classification shared by every domain error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or blank required input
    InvalidArgument,
    /// A referenced record does not exist
    NotFound,
    /// The write collides with an existing record
    Conflict,
    /// The input is well formed but breaks a business rule
    PolicyViolation,
    /// Storage, collaborator or consistency failure
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCategory::NotFound => "NOT_FOUND",
            ErrorCategory::Conflict => "CONFLICT",
            ErrorCategory::PolicyViolation => "POLICY_VIOLATION",
            ErrorCategory::Internal => "INTERNAL",
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },
}

impl ValidationError {
    /// Shorthand for a missing field
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredField { field: field.into() }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
        }
    }
}

/// Country, area and phone number errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("No such country: {code}")]
    NoSuchCountry { code: String },

    #[error("No such area: {area_id}")]
    NoSuchArea { area_id: i64 },

    #[error("No such phone number: {phone_number_id}")]
    NoSuchPhoneNumber { phone_number_id: i64 },

    #[error("Country already exists: {code}")]
    DuplicateCountry { code: String },

    #[error("An active area already exists for country {country_code} with call number {call_number}")]
    DuplicateSelectableArea {
        country_code: String,
        call_number: String,
    },

    #[error("Subscriber number length must be positive, got {length}")]
    NonPositiveSubscriberNumberLength { length: i32 },

    #[error("Invalid phone number: subscriber number has {actual} characters, area {area_id} expects {expected}")]
    InvalidPhoneNumber {
        area_id: i64,
        expected: i32,
        actual: usize,
    },
}

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DirectoryError::NoSuchCountry { .. }
            | DirectoryError::NoSuchArea { .. }
            | DirectoryError::NoSuchPhoneNumber { .. } => ErrorCategory::NotFound,
            DirectoryError::DuplicateCountry { .. }
            | DirectoryError::DuplicateSelectableArea { .. } => ErrorCategory::Conflict,
            DirectoryError::NonPositiveSubscriberNumberLength { .. }
            | DirectoryError::InvalidPhoneNumber { .. } => ErrorCategory::PolicyViolation,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DirectoryError::NoSuchCountry { .. } => "NO_SUCH_COUNTRY",
            DirectoryError::NoSuchArea { .. } => "NO_SUCH_AREA",
            DirectoryError::NoSuchPhoneNumber { .. } => "NO_SUCH_PHONE_NUMBER",
            DirectoryError::DuplicateCountry { .. } => "DUPLICATE_COUNTRY",
            DirectoryError::DuplicateSelectableArea { .. } => "DUPLICATE_SELECTABLE_AREA",
            DirectoryError::NonPositiveSubscriberNumberLength { .. } => {
                "NON_POSITIVE_SUBSCRIBER_NUMBER_LENGTH"
            }
            DirectoryError::InvalidPhoneNumber { .. } => "INVALID_PHONE_NUMBER",
        }
    }
}

/// Verification workflow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Verification length must be positive, got {length}")]
    NonPositiveVerificationLength { length: i64 },

    #[error("Verification length of {length} seconds is out of range")]
    VerificationLengthOutOfRange { length: i64 },

    #[error("No such verifiable data: {verifiable_data_id}")]
    NoSuchVerifiableData { verifiable_data_id: i64 },

    #[error("No such verification request: {verification_request_id}")]
    NoSuchVerificationRequest { verification_request_id: i64 },

    #[error("Token service failure: {message}")]
    TokenService { message: String },

    #[error("Template rendering failed: {message}")]
    TemplateRendering { message: String },

    #[error("Message dispatch failed: {message}")]
    Dispatch { message: String },
}

impl VerificationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VerificationError::NonPositiveVerificationLength { .. }
            | VerificationError::VerificationLengthOutOfRange { .. } => {
                ErrorCategory::PolicyViolation
            }
            VerificationError::NoSuchVerifiableData { .. }
            | VerificationError::NoSuchVerificationRequest { .. } => ErrorCategory::NotFound,
            VerificationError::TokenService { .. }
            | VerificationError::TemplateRendering { .. }
            | VerificationError::Dispatch { .. } => ErrorCategory::Internal,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::NonPositiveVerificationLength { .. } => {
                "NON_POSITIVE_VERIFICATION_LENGTH"
            }
            VerificationError::VerificationLengthOutOfRange { .. } => {
                "VERIFICATION_LENGTH_OUT_OF_RANGE"
            }
            VerificationError::NoSuchVerifiableData { .. } => "NO_SUCH_VERIFIABLE_DATA",
            VerificationError::NoSuchVerificationRequest { .. } => "NO_SUCH_VERIFICATION_REQUEST",
            VerificationError::TokenService { .. } => "TOKEN_SERVICE_FAILURE",
            VerificationError::TemplateRendering { .. } => "TEMPLATE_RENDERING_FAILURE",
            VerificationError::Dispatch { .. } => "DISPATCH_FAILURE",
        }
    }
}
