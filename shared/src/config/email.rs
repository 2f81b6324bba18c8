//! Outbound email configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Which delivery backend sends OTP emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log messages instead of sending them
    #[default]
    Mock,
    /// Transactional email HTTP API
    Http,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(EmailProvider::Mock),
            "http" | "api" => Ok(EmailProvider::Http),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery backend
    pub provider: EmailProvider,

    /// Sender address shown to administrators
    pub from_address: String,

    /// Endpoint of the transactional email API (http provider)
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer token for the email API (http provider)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Timeout for a single delivery request in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            from_address: String::from("no-reply@localhost"),
            api_url: None,
            api_key: None,
            request_timeout_secs: 15,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env_or("EMAIL_PROVIDER", defaults.provider),
            from_address: std::env::var("EMAIL_FROM")
                .or_else(|_| std::env::var("EMAIL"))
                .unwrap_or(defaults.from_address),
            api_url: std::env::var("EMAIL_API_URL").ok(),
            api_key: std::env::var("EMAIL_API_KEY").ok(),
            request_timeout_secs: env_or("EMAIL_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
        }
    }
}
