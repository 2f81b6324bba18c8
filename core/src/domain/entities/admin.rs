//! Administrator entity: a privileged user allowed to manage site content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aipp_shared::email::normalize_email;

use super::otp_challenge::OtpChallenge;

/// Administrator record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Administrator {
    /// Unique identifier for the administrator
    pub id: Uuid,

    /// Login email, stored in canonical form
    pub email: String,

    /// bcrypt hash of the password; not used by the OTP flow
    #[serde(default, skip_serializing)]
    pub password_hash: String,

    /// Passcode waiting for verification, if any
    pub otp: Option<OtpChallenge>,

    /// Timestamp when the administrator was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl Administrator {
    /// Creates a new administrator with no pending passcode
    pub fn new(email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            password_hash,
            otp: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces any pending passcode with `challenge`
    pub fn set_otp(&mut self, challenge: OtpChallenge) {
        self.otp = Some(challenge);
        self.updated_at = Utc::now();
    }

    /// Drops the pending passcode
    pub fn clear_otp(&mut self) {
        self.otp = None;
        self.updated_at = Utc::now();
    }
}
