//! Deployment environment and the logging defaults tied to it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the server is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    /// Refuses the default JWT secret and the mock mailer
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Read `ENVIRONMENT`, falling back to development when unset or unknown
    pub fn from_env() -> Self {
        std::env::var("ENVIRONMENT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Dotenv file loaded on top of `.env`, e.g. `.env.production`
    pub fn env_file(&self) -> String {
        format!(".env.{}", self.as_str())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Unknown environment: {}", other)),
        }
    }
}

/// Default `env_logger` filter, used when `RUST_LOG` is not set
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Staging)
    }
}

impl LoggingConfig {
    /// `debug` while developing, `info` everywhere else
    pub fn for_environment(env: Environment) -> Self {
        let level = if env == Environment::Development {
            "debug"
        } else {
            "info"
        };
        Self {
            level: level.to_string(),
        }
    }
}
