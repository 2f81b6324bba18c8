//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the AIPP website
//! backend. It provides the concrete implementations behind the traits
//! declared in `aipp_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL administrator repository using SQLx
//! - **Email**: OTP email delivery (mock and HTTP API providers)
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use aipp_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email service module - OTP delivery providers
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),
}
