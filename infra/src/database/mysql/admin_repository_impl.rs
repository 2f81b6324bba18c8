//! MySQL implementation of the AdminRepository trait.
//!
//! Administrators live in the `admins` table. The pending passcode is stored
//! as two nullable columns (`otp_code`, `otp_expires_at`) that are always
//! written together, plus `otp_failed_attempts`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use aipp_core::domain::entities::admin::Administrator;
use aipp_core::domain::entities::otp_challenge::OtpChallenge;
use aipp_core::errors::{AuthError, DomainError};
use aipp_core::repositories::AdminRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, password_hash, otp_code, otp_expires_at, otp_failed_attempts,
           created_at, updated_at
    FROM admins
"#;

/// MySQL implementation of AdminRepository
pub struct MySqlAdminRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAdminRepository {
    /// Create a new MySQL administrator repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Administrator entity
    fn row_to_admin(row: &sqlx::mysql::MySqlRow) -> Result<Administrator, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let otp_code: Option<String> = row.try_get("otp_code").map_err(column_error("otp_code"))?;
        let otp_expires_at: Option<DateTime<Utc>> = row
            .try_get("otp_expires_at")
            .map_err(column_error("otp_expires_at"))?;
        let failed_attempts: u32 = row
            .try_get("otp_failed_attempts")
            .map_err(column_error("otp_failed_attempts"))?;

        // A half-written pair is treated as no pending code
        let otp = match (otp_code, otp_expires_at) {
            (Some(code), Some(expires_at)) => Some(OtpChallenge {
                code,
                expires_at,
                failed_attempts,
            }),
            _ => None,
        };

        Ok(Administrator {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Repository {
                message: format!("Invalid administrator UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(column_error("email"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            otp,
            created_at: row.try_get("created_at").map_err(column_error("created_at"))?,
            updated_at: row.try_get("updated_at").map_err(column_error("updated_at"))?,
        })
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Repository {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, action = action, "Administrator query failed");
        DomainError::Repository {
            message: format!("Failed to {}: {}", action, e),
        }
    }
}

#[async_trait]
impl AdminRepository for MySqlAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Administrator>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find administrator by email"))?;

        row.as_ref().map(Self::row_to_admin).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Administrator>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find administrator by id"))?;

        row.as_ref().map(Self::row_to_admin).transpose()
    }

    async fn create(&self, admin: Administrator) -> Result<Administrator, DomainError> {
        let query = r#"
            INSERT INTO admins (
                id, email, password_hash, otp_code, otp_expires_at, otp_failed_attempts,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(admin.id.to_string())
            .bind(&admin.email)
            .bind(&admin.password_hash)
            .bind(admin.otp.as_ref().map(|o| o.code.clone()))
            .bind(admin.otp.as_ref().map(|o| o.expires_at))
            .bind(admin.otp.as_ref().map_or(0, |o| o.failed_attempts))
            .bind(admin.created_at)
            .bind(admin.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(admin),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::AlreadyRegistered.into())
            }
            Err(e) => Err(query_error("create administrator")(e)),
        }
    }

    async fn update_otp(&self, id: Uuid, otp: Option<OtpChallenge>) -> Result<(), DomainError> {
        let query = r#"
            UPDATE admins
            SET otp_code = ?, otp_expires_at = ?, otp_failed_attempts = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(otp.as_ref().map(|o| o.code.clone()))
            .bind(otp.as_ref().map(|o| o.expires_at))
            .bind(otp.as_ref().map_or(0, |o| o.failed_attempts))
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error("update administrator OTP"))?;

        if result.rows_affected() == 0 {
            // MySQL reports zero affected rows when nothing changed, so
            // confirm the record really is missing
            if self.find_by_id(id).await?.is_none() {
                return Err(DomainError::NotFound {
                    resource: "Administrator".to_string(),
                });
            }
        }

        Ok(())
    }

    async fn record_failed_attempt(
        &self,
        id: Uuid,
        code: &str,
    ) -> Result<Option<u32>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(query_error("begin failed-attempt transaction"))?;

        let result = sqlx::query(
            r#"
            UPDATE admins
            SET otp_failed_attempts = otp_failed_attempts + 1
            WHERE id = ? AND otp_code = ?
            "#,
        )
        .bind(id.to_string())
        .bind(code)
        .execute(&mut *tx)
        .await
        .map_err(query_error("record failed OTP attempt"))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let attempts: u32 =
            sqlx::query_scalar("SELECT otp_failed_attempts FROM admins WHERE id = ?")
                .bind(id.to_string())
                .fetch_one(&mut *tx)
                .await
                .map_err(query_error("read failed OTP attempts"))?;

        tx.commit()
            .await
            .map_err(query_error("commit failed-attempt transaction"))?;

        Ok(Some(attempts))
    }

    async fn redeem_otp(
        &self,
        id: Uuid,
        code: &str,
        now: DateTime<Utc>,
        max_failed_attempts: Option<u32>,
        consume: bool,
    ) -> Result<bool, DomainError> {
        // `? IS NULL` disables the attempt limit when none is configured
        const REDEEMABLE: &str = "id = ? AND otp_code = ? AND otp_expires_at >= ? \
             AND (? IS NULL OR otp_failed_attempts < ?)";

        if consume {
            let query = format!(
                "UPDATE admins SET otp_code = NULL, otp_expires_at = NULL, \
                 otp_failed_attempts = 0, updated_at = ? WHERE {}",
                REDEEMABLE
            );
            let result = sqlx::query(&query)
                .bind(Utc::now())
                .bind(id.to_string())
                .bind(code)
                .bind(now)
                .bind(max_failed_attempts)
                .bind(max_failed_attempts)
                .execute(&self.pool)
                .await
                .map_err(query_error("redeem administrator OTP"))?;

            Ok(result.rows_affected() == 1)
        } else {
            let query = format!("SELECT 1 FROM admins WHERE {}", REDEEMABLE);
            let row = sqlx::query(&query)
                .bind(id.to_string())
                .bind(code)
                .bind(now)
                .bind(max_failed_attempts)
                .bind(max_failed_attempts)
                .fetch_optional(&self.pool)
                .await
                .map_err(query_error("check administrator OTP"))?;

            Ok(row.is_some())
        }
    }
}
