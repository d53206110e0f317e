//! # Phone Number Core
//!
//! Domain layer for the phone number directory and the out-of-band phone
//! verification workflow. This crate contains domain entities, repository
//! interfaces, the directory and verification services, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
