//! Email Service Trait Adapter
//!
//! Bridges any infrastructure [`EmailService`] to the core
//! `EmailServiceTrait` used by the OTP service.

use async_trait::async_trait;
use aipp_core::services::otp::EmailServiceTrait;

use super::email_service::EmailService;

/// Adapter that implements the core EmailServiceTrait
pub struct EmailServiceAdapter {
    inner: Box<dyn EmailService>,
}

impl EmailServiceAdapter {
    /// Wrap an email service
    pub fn new(inner: Box<dyn EmailService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl EmailServiceTrait for EmailServiceAdapter {
    async fn send_otp(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        self.inner
            .send_otp_code(email, code, expires_in_minutes)
            .await
            .map_err(|e| e.to_string())
    }
}
