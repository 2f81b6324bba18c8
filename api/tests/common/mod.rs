//! Shared fixtures for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use aipp_api::routes::auth::AppState;
use aipp_core::repositories::{AdminRepository, InMemoryAdminRepository};
use aipp_core::services::{
    AdminDirectory, OtpService, OtpServiceConfig, TokenService, TokenServiceConfig,
};
use aipp_infra::email::{EmailServiceAdapter, MockEmailService};

pub const ADMIN_EMAIL: &str = "admin@example.org";
pub const JWT_SECRET: &str = "integration-test-secret";

pub type TestState = AppState<InMemoryAdminRepository, EmailServiceAdapter>;

pub struct TestContext {
    pub repository: Arc<InMemoryAdminRepository>,
    pub mailer: MockEmailService,
    pub token_service: Arc<TokenService>,
    pub state: web::Data<TestState>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_config(OtpServiceConfig::default()).await
    }

    pub async fn with_config(otp_config: OtpServiceConfig) -> Self {
        let repository = Arc::new(InMemoryAdminRepository::new());
        let directory = AdminDirectory::new(Arc::clone(&repository));
        directory
            .register(ADMIN_EMAIL, "admin-password")
            .await
            .expect("register test administrator");

        let mailer = MockEmailService::new();
        let email_service = Arc::new(EmailServiceAdapter::new(Box::new(mailer.clone())));

        let token_service = Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: JWT_SECRET.to_string(),
            ..TokenServiceConfig::default()
        }));

        let otp_service = Arc::new(OtpService::new(
            directory,
            email_service,
            Arc::clone(&token_service),
            otp_config,
        ));

        let state = web::Data::new(AppState::new(otp_service, Arc::clone(&token_service)));

        Self {
            repository,
            mailer,
            token_service,
            state,
        }
    }

    /// Code currently stored for the test administrator
    pub async fn stored_code(&self) -> Option<String> {
        self.repository
            .find_by_email(ADMIN_EMAIL)
            .await
            .expect("repository lookup")
            .and_then(|admin| admin.otp)
            .map(|otp| otp.code)
    }

    /// Code carried by the last email sent to the test administrator
    pub fn emailed_code(&self) -> Option<String> {
        let message = self.mailer.last_message_to(ADMIN_EMAIL)?;
        message
            .body
            .split_whitespace()
            .map(|word| word.trim_end_matches('.'))
            .find(|word| word.len() == 6 && word.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_string)
    }
}
