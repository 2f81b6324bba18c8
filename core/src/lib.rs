//! # AIPP Core
//!
//! Core business logic and domain layer for the AIPP website backend.
//! This crate contains the administrator and OTP entities, the business
//! services of the OTP login flow, the repository interface, and the error
//! types that the infrastructure and API layers build on.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::{Administrator, Claims, OtpChallenge, SessionCredential};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{AdminRepository, InMemoryAdminRepository};
pub use services::{
    AdminDirectory, EmailServiceTrait, OtpService, OtpServiceConfig, RequestOtpResult,
    TokenService, TokenServiceConfig, VerifyOtpResult,
};
