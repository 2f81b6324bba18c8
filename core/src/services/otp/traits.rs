//! Traits for notification channel integration

use async_trait::async_trait;

/// Trait for email delivery integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a passcode to `email`, returning the provider message id
    async fn send_otp(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String>;
}
