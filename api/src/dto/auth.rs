use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use aipp_shared::email::is_valid_email;

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Administrator email; surrounding whitespace and case are ignored
    #[validate(custom(function = "validate_email"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(custom(function = "validate_email"))]
    pub email: String,

    /// The code exactly as received; it is compared without trimming
    #[validate(length(min = 1, max = 64))]
    pub otp: String,
}

/// Body of every plain success or failure response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub message: String,
    /// Session token, valid for one hour
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub admin_id: Uuid,
    pub expires_at: DateTime<Utc>,
}
