//! Directory service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use aipp_shared::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::admin::Administrator;
use crate::domain::entities::otp_challenge::OtpChallenge;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AdminRepository;

/// Resolves administrators and manages their pending passcodes
pub struct AdminDirectory<A: AdminRepository> {
    repository: Arc<A>,
}

impl<A: AdminRepository> Clone for AdminDirectory<A> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<A: AdminRepository> AdminDirectory<A> {
    /// Create a directory over the given repository
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    /// Look up an administrator by email. No side effects.
    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<Administrator>> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Ok(None);
        }
        self.repository.find_by_email(&email).await
    }

    /// Look up an administrator by identifier
    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Administrator>> {
        self.repository.find_by_id(id).await
    }

    /// Register a new administrator with a bcrypt-hashed password
    ///
    /// # Returns
    ///
    /// * `Ok(Administrator)` - The stored record
    /// * `Err(DomainError::Validation)` - Malformed email or empty password
    /// * `Err(DomainError::Auth(AuthError::AlreadyRegistered))` - Email taken
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<Administrator> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "A valid email is required".to_string(),
            });
        }
        if password.is_empty() {
            return Err(DomainError::Validation {
                message: "Password is required".to_string(),
            });
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::AlreadyRegistered.into());
        }

        let password_hash = hash_password(password)?;
        let admin = self
            .repository
            .create(Administrator::new(&email, password_hash))
            .await?;

        tracing::info!(
            email = %mask_email(&admin.email),
            admin_id = %admin.id,
            event = "admin_registered",
            "Registered administrator"
        );

        Ok(admin)
    }

    /// Make sure an administrator exists for `email`; an existing record is
    /// returned untouched, password included.
    pub async fn ensure_registered(
        &self,
        email: &str,
        password: &str,
    ) -> DomainResult<Administrator> {
        if let Some(existing) = self.find_by_email(email).await? {
            tracing::debug!(
                email = %mask_email(&existing.email),
                "Administrator already present, skipping bootstrap"
            );
            return Ok(existing);
        }

        match self.register(email, password).await {
            Err(DomainError::Auth(AuthError::AlreadyRegistered)) => self
                .find_by_email(email)
                .await?
                .ok_or_else(|| DomainError::NotFound {
                    resource: "Administrator".to_string(),
                }),
            other => other,
        }
    }

    /// Bind `challenge` to the administrator, replacing any pending code
    pub async fn store_otp(&self, admin_id: Uuid, challenge: OtpChallenge) -> DomainResult<()> {
        self.repository.update_otp(admin_id, Some(challenge)).await
    }

    /// Count a wrong submission against `code` if it is still pending
    pub async fn record_failed_attempt(
        &self,
        admin_id: Uuid,
        code: &str,
    ) -> DomainResult<Option<u32>> {
        self.repository.record_failed_attempt(admin_id, code).await
    }

    /// Accept `code` in one conditional step; see [`AdminRepository::redeem_otp`]
    pub async fn redeem_otp(
        &self,
        admin_id: Uuid,
        code: &str,
        now: DateTime<Utc>,
        max_failed_attempts: Option<u32>,
        consume: bool,
    ) -> DomainResult<bool> {
        self.repository
            .redeem_otp(admin_id, code, now, max_failed_attempts, consume)
            .await
    }
}

fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}
