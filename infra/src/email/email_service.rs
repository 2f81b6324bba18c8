//! Email Service Interface
//!
//! Defines the trait for email delivery implementations that send
//! administrator passcodes.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Subject line of passcode emails
pub const OTP_EMAIL_SUBJECT: &str = "Your Admin OTP";

/// Body of a passcode email
pub fn otp_email_body(code: &str, expires_in_minutes: i64) -> String {
    format!(
        "Your OTP is {}. It will expire in {} minutes.",
        code, expires_in_minutes
    )
}

/// Email service trait for sending messages
///
/// Implementations include:
/// - Transactional email HTTP API
/// - Mock implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a plain-text email
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Send a passcode using the standard subject and wording
    async fn send_otp_code(
        &self,
        to: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        let body = otp_email_body(code, expires_in_minutes);
        self.send_email(to, OTP_EMAIL_SUBJECT, &body).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}
