//! Business services containing domain logic and use cases.

pub mod directory;
pub mod verification;

// Re-export commonly used types
pub use directory::{DirectoryService, MockDirectoryService};
pub use verification::{
    DollarTemplateRenderer, MessageEncoding, MockTokenService, OutboundSms,
    PhoneVerificationService, SmsDispatchTrait, TemplateRenderer, TokenOutcome,
    VerificationReceipt, VerificationServiceConfig, VerificationTokenService,
};
