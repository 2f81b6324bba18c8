//! Business services containing domain logic and use cases.

pub mod directory;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use directory::AdminDirectory;
pub use otp::{
    EmailServiceTrait, OtpService, OtpServiceConfig, RequestOtpResult, VerifyOtpResult,
};
pub use token::{TokenService, TokenServiceConfig};
