//! Unit tests for the in-memory administrator repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::admin::Administrator;
use crate::domain::entities::otp_challenge::OtpChallenge;
use crate::errors::{AuthError, DomainError};
use crate::repositories::admin::{AdminRepository, InMemoryAdminRepository};

#[tokio::test]
async fn test_create_and_find_by_id() {
    let repo = InMemoryAdminRepository::new();
    let admin = Administrator::new("admin@example.org", "hash".to_string());

    let created = repo.create(admin.clone()).await.unwrap();
    assert_eq!(created.id, admin.id);

    let found = repo.find_by_id(admin.id).await.unwrap();
    assert_eq!(found.unwrap().email, "admin@example.org");
}

#[tokio::test]
async fn test_find_by_email() {
    let repo = InMemoryAdminRepository::new();
    let admin = Administrator::new("Admin@Example.org", "hash".to_string());
    repo.create(admin.clone()).await.unwrap();

    let found = repo.find_by_email("admin@example.org").await.unwrap();
    assert_eq!(found.map(|a| a.id), Some(admin.id));

    let missing = repo.find_by_email("other@example.org").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = InMemoryAdminRepository::new();
    repo.create(Administrator::new("admin@example.org", String::new()))
        .await
        .unwrap();

    let result = repo
        .create(Administrator::new("ADMIN@example.org", String::new()))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AlreadyRegistered))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_update_otp_sets_and_clears() {
    let repo = InMemoryAdminRepository::new();
    let admin = repo
        .create(Administrator::new("admin@example.org", String::new()))
        .await
        .unwrap();

    let now = Utc::now();
    let challenge = OtpChallenge::with_code("123456", now, Duration::minutes(10));
    repo.update_otp(admin.id, Some(challenge.clone())).await.unwrap();

    let stored = repo.find_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(stored.otp, Some(challenge));

    repo.update_otp(admin.id, None).await.unwrap();
    let stored = repo.find_by_id(admin.id).await.unwrap().unwrap();
    assert!(stored.otp.is_none());
}

#[tokio::test]
async fn test_update_otp_replaces_previous_code() {
    let repo = InMemoryAdminRepository::new();
    let admin = repo
        .create(Administrator::new("admin@example.org", String::new()))
        .await
        .unwrap();
    let now = Utc::now();

    repo.update_otp(
        admin.id,
        Some(OtpChallenge::with_code("111111", now, Duration::minutes(10))),
    )
    .await
    .unwrap();
    repo.update_otp(
        admin.id,
        Some(OtpChallenge::with_code("222222", now, Duration::minutes(10))),
    )
    .await
    .unwrap();

    let stored = repo.find_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(stored.otp.unwrap().code, "222222");
}

#[tokio::test]
async fn test_update_otp_unknown_admin() {
    let repo = InMemoryAdminRepository::new();

    let result = repo.update_otp(Uuid::new_v4(), None).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_clones_share_storage() {
    let repo = InMemoryAdminRepository::new();
    let clone = repo.clone();

    clone
        .create(Administrator::new("admin@example.org", String::new()))
        .await
        .unwrap();

    assert!(!repo.is_empty().await);
}

async fn admin_with_code(repo: &InMemoryAdminRepository, code: &str) -> Administrator {
    let admin = Administrator::new("admin@example.org", "hash".to_string());
    repo.create(admin.clone()).await.unwrap();
    repo.update_otp(
        admin.id,
        Some(OtpChallenge::with_code(code, Utc::now(), Duration::minutes(10))),
    )
    .await
    .unwrap();
    admin
}

#[tokio::test]
async fn test_record_failed_attempt_counts_each_call() {
    let repo = InMemoryAdminRepository::new();
    let admin = admin_with_code(&repo, "482913").await;

    assert_eq!(repo.record_failed_attempt(admin.id, "482913").await.unwrap(), Some(1));
    assert_eq!(repo.record_failed_attempt(admin.id, "482913").await.unwrap(), Some(2));

    let stored = repo.find_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(stored.otp.unwrap().failed_attempts, 2);
}

#[tokio::test]
async fn test_record_failed_attempt_ignores_replaced_code() {
    let repo = InMemoryAdminRepository::new();
    let admin = admin_with_code(&repo, "482913").await;
    repo.update_otp(
        admin.id,
        Some(OtpChallenge::with_code("777777", Utc::now(), Duration::minutes(10))),
    )
    .await
    .unwrap();

    assert_eq!(repo.record_failed_attempt(admin.id, "482913").await.unwrap(), None);

    let stored = repo.find_by_id(admin.id).await.unwrap().unwrap().otp.unwrap();
    assert_eq!(stored.code, "777777");
    assert_eq!(stored.failed_attempts, 0);
}

#[tokio::test]
async fn test_redeem_otp_consumes_once() {
    let repo = InMemoryAdminRepository::new();
    let admin = admin_with_code(&repo, "482913").await;
    let now = Utc::now();

    assert!(repo.redeem_otp(admin.id, "482913", now, None, true).await.unwrap());
    assert!(!repo.redeem_otp(admin.id, "482913", now, None, true).await.unwrap());
    assert!(repo.find_by_id(admin.id).await.unwrap().unwrap().otp.is_none());
}

#[tokio::test]
async fn test_redeem_otp_without_consume_keeps_code() {
    let repo = InMemoryAdminRepository::new();
    let admin = admin_with_code(&repo, "482913").await;
    let now = Utc::now();

    assert!(repo.redeem_otp(admin.id, "482913", now, None, false).await.unwrap());
    assert!(repo.redeem_otp(admin.id, "482913", now, None, false).await.unwrap());
}

#[tokio::test]
async fn test_redeem_otp_rejects_expired_locked_or_unknown() {
    let repo = InMemoryAdminRepository::new();
    let admin = admin_with_code(&repo, "482913").await;
    let later = Utc::now() + Duration::minutes(11);

    assert!(!repo.redeem_otp(admin.id, "482913", later, None, true).await.unwrap());

    repo.record_failed_attempt(admin.id, "482913").await.unwrap();
    assert!(!repo.redeem_otp(admin.id, "482913", Utc::now(), Some(1), true).await.unwrap());

    assert!(!repo.redeem_otp(Uuid::new_v4(), "482913", Utc::now(), None, true).await.unwrap());
}
