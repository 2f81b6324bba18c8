//! Error types for the administrator login flow and session tokens
//!
//! The HTTP layer decides the wording and status code shown to clients;
//! these variants only name what went wrong.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// OTP requested for an email with no administrator record
    #[error("Email is not registered as an administrator")]
    NotRegistered,

    /// The passcode was stored but the email could not be sent
    #[error("OTP delivery failed")]
    DeliveryFailed,

    /// Unknown email, no pending code, wrong code or expired code.
    ///
    /// Deliberately one variant so callers cannot tell which check failed.
    #[error("Invalid or expired OTP")]
    InvalidOrExpired,

    /// Administrator already exists for the email
    #[error("Administrator already exists")]
    AlreadyRegistered,
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing or malformed claim: {claim}")]
    InvalidClaim { claim: String },
}
