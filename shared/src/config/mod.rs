//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Session tokens, OTP policy and administrator bootstrap
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound email delivery
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use auth::{BootstrapConfig, JwtConfig, OtpConfig, DEFAULT_JWT_SECRET};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Configuration rejected at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in {0}")]
    DefaultJwtSecret(Environment),

    #[error("Mock email provider is not allowed in {0}")]
    MockEmailProvider(Environment),

    #[error("EMAIL_API_URL and EMAIL_API_KEY are required for the http email provider")]
    MissingEmailApiSettings,

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session token configuration
    pub jwt: JwtConfig,

    /// OTP policy
    pub otp: OtpConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Administrator bootstrap
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            otp: OtpConfig::from_env(),
            email: EmailConfig::from_env(),
            bootstrap: BootstrapConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Reject settings that are unsafe or unusable for the current environment
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.expiry_seconds <= 0 {
            return Err(ConfigError::NonPositive { field: "JWT_EXPIRY_SECONDS" });
        }
        if self.otp.expiration_minutes <= 0 {
            return Err(ConfigError::NonPositive { field: "OTP_EXPIRATION_MINUTES" });
        }
        if self.email.provider == EmailProvider::Http
            && (self.email.api_url.is_none() || self.email.api_key.is_none())
        {
            return Err(ConfigError::MissingEmailApiSettings);
        }
        if self.environment.is_production() {
            if self.jwt.is_using_default_secret() {
                return Err(ConfigError::DefaultJwtSecret(self.environment));
            }
            if self.email.provider == EmailProvider::Mock {
                return Err(ConfigError::MockEmailProvider(self.environment));
            }
        }
        Ok(())
    }
}

/// Read and parse an environment variable, falling back to `default` when
/// it is missing or malformed
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
