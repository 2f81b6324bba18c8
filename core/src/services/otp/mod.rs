//! OTP service module for administrator email login
//!
//! This module provides the passcode workflow:
//! - Code generation and binding to the administrator record
//! - Email dispatch through an injected delivery channel
//! - Verification with expiry, optional one-time use and attempt limits
//! - Session credential issuance on success

mod config;
mod service;
mod traits;
mod types;


pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::EmailServiceTrait;
pub use types::{RequestOtpResult, VerifyOtpResult};
