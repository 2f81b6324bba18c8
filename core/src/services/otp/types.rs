//! Types for OTP service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_objects::SessionCredential;

/// Result of requesting a passcode
#[derive(Debug, Clone)]
pub struct RequestOtpResult {
    /// Administrator the code was issued to
    pub admin_id: Uuid,
    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Message id returned by the email provider
    pub message_id: String,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyOtpResult {
    /// Administrator that logged in
    pub admin_id: Uuid,
    /// Session credential for the administrator
    pub session: SessionCredential,
}
