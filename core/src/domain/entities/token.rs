//! Session token claims for JWT-based administrator sessions.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token lifetime (1 hour)
pub const SESSION_TOKEN_EXPIRY_SECONDS: i64 = 3600;

/// Issuer used when none is configured
pub const DEFAULT_JWT_ISSUER: &str = "aipp-admin";

/// Claims structure for the session token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (administrator ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for an administrator session issued at `now`
    pub fn new_session(
        admin_id: Uuid,
        issuer: &str,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let expiry = now + lifetime;
        Self {
            sub: admin_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Administrator ID carried in `sub`
    pub fn admin_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether the claims are expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}
