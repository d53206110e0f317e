//! Domain entities for the dialing directory and phone verification.

pub mod area;
pub mod country;
pub mod phone_number;
pub mod verification;

pub use area::{Area, NewArea};
pub use country::{Country, COUNTRY_CODE_MAX_LENGTH};
pub use phone_number::{CallablePhoneNumber, PhoneNumber};
pub use verification::{
    ConfirmationResult, PhoneVerificationRequest, PhoneVerificationResult, VerifiablePhone,
    VerificationChannel, VerificationLengthBasis, VerificationLink, VerificationState,
};
