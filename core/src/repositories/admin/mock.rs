//! In-memory implementation of AdminRepository for tests and local development

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::admin::Administrator;
use crate::domain::entities::otp_challenge::OtpChallenge;
use crate::errors::{AuthError, DomainError};

use super::trait_::AdminRepository;

/// Administrator store backed by a `HashMap`
#[derive(Clone, Default)]
pub struct InMemoryAdminRepository {
    admins: Arc<RwLock<HashMap<Uuid, Administrator>>>,
}

impl InMemoryAdminRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored administrators
    pub async fn len(&self) -> usize {
        self.admins.read().await.len()
    }

    /// Whether the repository holds no administrators
    pub async fn is_empty(&self) -> bool {
        self.admins.read().await.is_empty()
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Administrator>, DomainError> {
        let admins = self.admins.read().await;
        Ok(admins.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Administrator>, DomainError> {
        let admins = self.admins.read().await;
        Ok(admins.get(&id).cloned())
    }

    async fn create(&self, admin: Administrator) -> Result<Administrator, DomainError> {
        let mut admins = self.admins.write().await;

        if admins.values().any(|a| a.email == admin.email) {
            return Err(AuthError::AlreadyRegistered.into());
        }

        admins.insert(admin.id, admin.clone());
        Ok(admin)
    }

    async fn update_otp(&self, id: Uuid, otp: Option<OtpChallenge>) -> Result<(), DomainError> {
        let mut admins = self.admins.write().await;

        let admin = admins.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "Administrator".to_string(),
        })?;

        match otp {
            Some(challenge) => admin.set_otp(challenge),
            None => admin.clear_otp(),
        }
        Ok(())
    }

    async fn record_failed_attempt(
        &self,
        id: Uuid,
        code: &str,
    ) -> Result<Option<u32>, DomainError> {
        let mut admins = self.admins.write().await;

        let pending = admins
            .get_mut(&id)
            .and_then(|admin| admin.otp.as_mut())
            .filter(|challenge| challenge.code == code);

        Ok(pending.map(|challenge| {
            challenge.record_failure();
            challenge.failed_attempts
        }))
    }

    async fn redeem_otp(
        &self,
        id: Uuid,
        code: &str,
        now: DateTime<Utc>,
        max_failed_attempts: Option<u32>,
        consume: bool,
    ) -> Result<bool, DomainError> {
        let mut admins = self.admins.write().await;

        let Some(admin) = admins.get_mut(&id) else {
            return Ok(false);
        };
        let redeemable = admin
            .otp
            .as_ref()
            .is_some_and(|challenge| challenge.is_redeemable(code, now, max_failed_attempts));

        if redeemable && consume {
            admin.clear_otp();
        }
        Ok(redeemable)
    }
}
