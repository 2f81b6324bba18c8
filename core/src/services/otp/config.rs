//! Configuration for the OTP service

use aipp_shared::config::OtpConfig;

use crate::domain::entities::otp_challenge::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before a passcode expires
    pub code_expiration_minutes: i64,
    /// Keep a passcode valid after a successful verification
    pub allow_reuse: bool,
    /// Wrong submissions tolerated per passcode; `None` disables the limit
    pub max_failed_attempts: Option<u32>,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            allow_reuse: false,
            max_failed_attempts: None,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_expiration_minutes: config.expiration_minutes,
            allow_reuse: config.allow_reuse,
            max_failed_attempts: config.max_failed_attempts,
        }
    }
}
