//! Authentication configuration: session tokens, OTP policy, administrator bootstrap

use serde::{Deserialize, Serialize};

use super::env_or;

/// Secret used when JWT_SECRET is not provided; refused in production
pub const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing and verifying session tokens
    pub secret: String,

    /// Session token lifetime in seconds
    pub expiry_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            expiry_seconds: 3600, // 1 hour
            issuer: String::from("aipp-admin"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiry_seconds: env_or("JWT_EXPIRY_SECONDS", defaults.expiry_seconds),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// One-time passcode policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a freshly issued code stays valid
    pub expiration_minutes: i64,

    /// Keep a code valid after a successful verification (until it expires
    /// or a new one is requested)
    #[serde(default)]
    pub allow_reuse: bool,

    /// Reject a pending code after this many wrong submissions
    #[serde(default)]
    pub max_failed_attempts: Option<u32>,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiration_minutes: 10,
            allow_reuse: false,
            max_failed_attempts: None,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            expiration_minutes: env_or("OTP_EXPIRATION_MINUTES", defaults.expiration_minutes),
            allow_reuse: env_or("OTP_ALLOW_REUSE", defaults.allow_reuse),
            max_failed_attempts: std::env::var("OTP_MAX_FAILED_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|max: &u32| *max > 0),
        }
    }
}

/// Administrator created at startup when none exists for the email.
///
/// There is no self-registration endpoint; this is the out-of-band path.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BootstrapConfig {
    pub admin_email: Option<String>,
    #[serde(skip_serializing)]
    pub admin_password: Option<String>,
}

impl BootstrapConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            admin_email: std::env::var("ADMIN_BOOTSTRAP_EMAIL").ok().filter(|v| !v.trim().is_empty()),
            admin_password: std::env::var("ADMIN_BOOTSTRAP_PASSWORD").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Email and password, when both are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_email, &self.admin_password) {
            (Some(email), Some(password)) => Some((email.as_str(), password.as_str())),
            _ => None,
        }
    }
}
