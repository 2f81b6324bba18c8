//! Email Service Module
//!
//! This module provides email delivery for administrator passcodes.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all providers
//! - **Mock Implementation**: In-memory outbox for development and tests
//! - **HTTP Support**: Transactional email API over HTTPS
//! - **Security**: Addresses are masked in logs and codes are never logged

pub mod email_service;
pub mod email_trait_adapter;
pub mod http_email;
pub mod mock_email;

// Re-export commonly used types
pub use email_service::{otp_email_body, EmailService, OTP_EMAIL_SUBJECT};
pub use email_trait_adapter::EmailServiceAdapter;
pub use http_email::{HttpEmailConfig, HttpEmailService};
pub use mock_email::{MockEmailService, SentEmail};

use aipp_shared::config::{EmailConfig, EmailProvider};

use crate::InfrastructureError;


/// Create an email service based on configuration
///
/// A misconfigured HTTP provider is an error; there is no fallback to the
/// mock.
pub fn create_email_service(
    config: &EmailConfig,
) -> Result<Box<dyn EmailService>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::warn!("Using mock email service; OTP emails will not be delivered");
            Ok(Box::new(MockEmailService::new()))
        }
        EmailProvider::Http => {
            let http_config = HttpEmailConfig::try_from(config)?;
            Ok(Box::new(HttpEmailService::new(http_config)?))
        }
    }
}
