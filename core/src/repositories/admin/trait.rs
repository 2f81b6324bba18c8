//! Administrator repository trait defining the interface for administrator persistence.
//!
//! The trait is the only way the domain reads or writes administrator
//! records, so storage (MySQL, in-memory) is injected rather than global.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::admin::Administrator;
use crate::domain::entities::otp_challenge::OtpChallenge;
use crate::errors::DomainError;

/// Repository trait for Administrator persistence operations
///
/// Emails passed in are already canonical (see
/// `aipp_shared::email::normalize_email`); implementations compare them
/// exactly.
///
/// # Example
/// ```no_run
/// # use aipp_core::repositories::AdminRepository;
/// # async fn example(repo: &impl AdminRepository) -> Result<(), Box<dyn std::error::Error>> {
/// match repo.find_by_email("admin@example.org").await? {
///     Some(admin) => println!("Administrator found: {}", admin.id),
///     None => println!("Not registered"),
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find an administrator by canonical email
    ///
    /// # Returns
    /// * `Ok(Some(Administrator))` - Administrator found
    /// * `Ok(None)` - No administrator with this email
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<Administrator>, DomainError>;

    /// Find an administrator by identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Administrator>, DomainError>;

    /// Insert a new administrator
    ///
    /// # Returns
    /// * `Ok(Administrator)` - The stored record
    /// * `Err(DomainError::Auth(AuthError::AlreadyRegistered))` - Email taken
    async fn create(&self, admin: Administrator) -> Result<Administrator, DomainError>;

    /// Replace the pending passcode of an administrator.
    ///
    /// `Some` overwrites any previous code, expiry and failure counter
    /// together; `None` clears them together.
    ///
    /// # Returns
    /// * `Ok(())` - Stored
    /// * `Err(DomainError::NotFound)` - No administrator with this id
    async fn update_otp(&self, id: Uuid, otp: Option<OtpChallenge>) -> Result<(), DomainError>;

    /// Count one wrong submission against the pending code, but only while
    /// `code` is still the pending code. The increment happens in a single
    /// step, so concurrent wrong guesses are all counted.
    ///
    /// # Returns
    /// * `Ok(Some(n))` - Counter after the increment
    /// * `Ok(None)` - `code` is no longer pending (replaced or consumed)
    async fn record_failed_attempt(
        &self,
        id: Uuid,
        code: &str,
    ) -> Result<Option<u32>, DomainError>;

    /// Accept `code` if it is still pending, unexpired at `now` and under
    /// the failure limit, all checked in one conditional step.
    ///
    /// With `consume` set the code is cleared in the same step, so at most
    /// one caller can redeem it.
    ///
    /// # Returns
    /// * `Ok(true)` - Redeemed
    /// * `Ok(false)` - The code changed, expired, was locked or was already used
    async fn redeem_otp(
        &self,
        id: Uuid,
        code: &str,
        now: DateTime<Utc>,
        max_failed_attempts: Option<u32>,
        consume: bool,
    ) -> Result<bool, DomainError>;
}
