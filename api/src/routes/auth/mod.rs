//! Authentication route handlers
//!
//! This module contains the administrator login endpoints:
//! - Requesting a one-time passcode by email
//! - Exchanging the passcode for a session token
//! - Inspecting the current session

pub mod send_otp;
pub mod session;
pub mod verify_otp;

use std::sync::Arc;

use aipp_core::repositories::AdminRepository;
use aipp_core::services::otp::{EmailServiceTrait, OtpService};
use aipp_core::services::token::TokenService;

/// Application state that holds shared services
pub struct AppState<A, E>
where
    A: AdminRepository,
    E: EmailServiceTrait,
{
    pub otp_service: Arc<OtpService<A, E>>,
    pub token_service: Arc<TokenService>,
}

impl<A, E> AppState<A, E>
where
    A: AdminRepository,
    E: EmailServiceTrait,
{
    pub fn new(otp_service: Arc<OtpService<A, E>>, token_service: Arc<TokenService>) -> Self {
        Self {
            otp_service,
            token_service,
        }
    }
}
