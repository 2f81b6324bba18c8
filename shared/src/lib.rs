//! Shared utilities and common types for the AIPP website server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Email address utilities (canonicalization, validation, log masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BootstrapConfig, ConfigError, CorsConfig, DatabaseConfig, EmailConfig,
    EmailProvider, Environment, JwtConfig, LoggingConfig, OtpConfig, ServerConfig,
};
pub use utils::email;
