//! Pending one-time passcode bound to an administrator record.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the passcode
pub const OTP_CODE_LENGTH: usize = 6;

/// Smallest code that can be issued (codes never start with 0)
pub const OTP_CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const OTP_CODE_MAX: u32 = 999_999;

/// Default lifetime of a passcode (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// A passcode waiting to be verified.
///
/// The code and its expiry only exist together: an administrator either has
/// an `OtpChallenge` or has no pending code at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// The 6-digit passcode
    pub code: String,

    /// Instant after which the code is rejected
    pub expires_at: DateTime<Utc>,

    /// Wrong submissions recorded against this code
    #[serde(default)]
    pub failed_attempts: u32,
}

impl OtpChallenge {
    /// Issue a fresh random code valid for `ttl` starting at `now`
    pub fn issue(now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::with_code(Self::generate_code(), now, ttl)
    }

    /// Bind a known code to an expiry
    pub fn with_code(code: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code: code.into(),
            expires_at: now + ttl,
            failed_attempts: 0,
        }
    }

    /// Draws a code uniformly from [100000, 999999] using the OS CSPRNG
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(OTP_CODE_MIN..=OTP_CODE_MAX);
        code.to_string()
    }

    /// A code is expired only when `now` is strictly after its expiry
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Exact, constant-time comparison; the submitted value is not trimmed
    /// or otherwise normalized
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Whether the failed-attempt budget is used up
    pub fn is_locked(&self, max_failed_attempts: Option<u32>) -> bool {
        max_failed_attempts.is_some_and(|max| self.failed_attempts >= max)
    }

    /// Record one wrong submission
    pub fn record_failure(&mut self) {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
    }

    /// Whether this exact stored `code` may still be accepted at `now`
    pub fn is_redeemable(
        &self,
        code: &str,
        now: DateTime<Utc>,
        max_failed_attempts: Option<u32>,
    ) -> bool {
        self.code == code && !self.is_expired_at(now) && !self.is_locked(max_failed_attempts)
    }
}
