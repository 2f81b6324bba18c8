//! Domain entities representing core business objects.

pub mod admin;
pub mod otp_challenge;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use admin::Administrator;
pub use otp_challenge::{
    OtpChallenge, DEFAULT_EXPIRATION_MINUTES, OTP_CODE_LENGTH, OTP_CODE_MAX, OTP_CODE_MIN,
};
pub use token::{Claims, DEFAULT_JWT_ISSUER, SESSION_TOKEN_EXPIRY_SECONDS};
