//! Main OTP service implementation

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use aipp_shared::email::mask_email;

use crate::domain::entities::otp_challenge::OtpChallenge;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AdminRepository;
use crate::services::directory::AdminDirectory;
use crate::services::token::TokenService;

use super::config::OtpServiceConfig;
use super::traits::EmailServiceTrait;
use super::types::{RequestOtpResult, VerifyOtpResult};

/// Issues and verifies administrator passcodes
pub struct OtpService<A: AdminRepository, E: EmailServiceTrait> {
    /// Directory holding administrator records
    directory: AdminDirectory<A>,
    /// Channel used to deliver codes
    email_service: Arc<E>,
    /// Signs session credentials
    token_service: Arc<TokenService>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<A: AdminRepository, E: EmailServiceTrait> OtpService<A, E> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `directory` - Administrator directory
    /// * `email_service` - Email delivery implementation
    /// * `token_service` - Session token signer
    /// * `config` - Service configuration
    pub fn new(
        directory: AdminDirectory<A>,
        email_service: Arc<E>,
        token_service: Arc<TokenService>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            directory,
            email_service,
            token_service,
            config,
        }
    }

    /// Service configuration
    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a passcode to a registered administrator
    ///
    /// See [`OtpService::request_otp_at`].
    pub async fn request_otp(&self, email: &str) -> DomainResult<RequestOtpResult> {
        self.request_otp_at(email, Utc::now()).await
    }

    /// Issue a passcode as of `now`
    ///
    /// This method:
    /// 1. Resolves the administrator by email
    /// 2. Generates a fresh code expiring after the configured lifetime
    /// 3. Stores it on the record, replacing any previous code
    /// 4. Emails it to the stored address
    ///
    /// # Returns
    ///
    /// * `Ok(RequestOtpResult)` - Code stored and sent
    /// * `Err(AuthError::NotRegistered)` - Nothing stored, nothing sent
    /// * `Err(AuthError::DeliveryFailed)` - Code stored and still valid, but not sent
    pub async fn request_otp_at(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<RequestOtpResult> {
        let admin = match self.directory.find_by_email(email).await? {
            Some(admin) => admin,
            None => {
                tracing::warn!(
                    email = %mask_email(email),
                    event = "otp_request_rejected",
                    "OTP requested for unregistered email"
                );
                return Err(AuthError::NotRegistered.into());
            }
        };

        let ttl_minutes = self.config.code_expiration_minutes;
        let challenge = OtpChallenge::issue(now, Duration::minutes(ttl_minutes));
        let expires_at = challenge.expires_at;
        let code = challenge.code.clone();

        self.directory.store_otp(admin.id, challenge).await?;

        tracing::info!(
            email = %mask_email(&admin.email),
            admin_id = %admin.id,
            expires_at = %expires_at,
            event = "otp_issued",
            "Stored new OTP for administrator"
        );

        let message_id = self
            .email_service
            .send_otp(&admin.email, &code, ttl_minutes)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&admin.email),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to send OTP email"
                );
                DomainError::from(AuthError::DeliveryFailed)
            })?;

        tracing::info!(
            email = %mask_email(&admin.email),
            message_id = %message_id,
            event = "otp_sent",
            "OTP email dispatched"
        );

        Ok(RequestOtpResult {
            admin_id: admin.id,
            expires_at,
            message_id,
        })
    }

    /// Exchange a passcode for a session credential
    ///
    /// See [`OtpService::verify_otp_at`].
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<VerifyOtpResult> {
        self.verify_otp_at(email, code, Utc::now()).await
    }

    /// Verify a passcode as of `now`
    ///
    /// Unknown email, missing code, wrong code, exhausted attempts and
    /// expiry all fail with the same `AuthError::InvalidOrExpired`.
    pub async fn verify_otp_at(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<VerifyOtpResult> {
        let admin = match self.directory.find_by_email(email).await? {
            Some(admin) => admin,
            None => return Err(self.reject(email, "unknown_email")),
        };

        let challenge = match admin.otp {
            Some(challenge) => challenge,
            None => return Err(self.reject(&admin.email, "no_pending_code")),
        };

        if challenge.is_expired_at(now) {
            return Err(self.reject(&admin.email, "expired"));
        }

        let max_failed_attempts = self.config.max_failed_attempts;
        if challenge.is_locked(max_failed_attempts) {
            return Err(self.reject(&admin.email, "attempts_exhausted"));
        }

        if !challenge.matches(code) {
            if max_failed_attempts.is_some() {
                // Counted against the code read above; a newer code is left alone
                self.directory
                    .record_failed_attempt(admin.id, &challenge.code)
                    .await?;
            }
            return Err(self.reject(&admin.email, "mismatch"));
        }

        // Re-checked and consumed in one step so a concurrent verify, a
        // replacement code or the last allowed failure wins over this read
        let redeemed = self
            .directory
            .redeem_otp(
                admin.id,
                &challenge.code,
                now,
                max_failed_attempts,
                !self.config.allow_reuse,
            )
            .await?;
        if !redeemed {
            return Err(self.reject(&admin.email, "no_longer_pending"));
        }

        let session = self.token_service.issue_at(admin.id, now)?;

        tracing::info!(
            email = %mask_email(&admin.email),
            admin_id = %admin.id,
            event = "otp_verified",
            "Administrator logged in with OTP"
        );

        Ok(VerifyOtpResult {
            admin_id: admin.id,
            session,
        })
    }

    fn reject(&self, email: &str, reason: &'static str) -> DomainError {
        tracing::warn!(
            email = %mask_email(email),
            reason = reason,
            event = "otp_verification_failed",
            "OTP verification failed"
        );
        AuthError::InvalidOrExpired.into()
    }
}
