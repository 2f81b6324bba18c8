//! Unit tests for session token claims

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, DEFAULT_JWT_ISSUER, SESSION_TOKEN_EXPIRY_SECONDS};

#[test]
fn test_new_session_claims() {
    let admin_id = Uuid::new_v4();
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let claims = Claims::new_session(
        admin_id,
        DEFAULT_JWT_ISSUER,
        now,
        Duration::seconds(SESSION_TOKEN_EXPIRY_SECONDS),
    );

    assert_eq!(claims.admin_id().unwrap(), admin_id);
    assert_eq!(claims.iat, now.timestamp());
    assert_eq!(claims.exp - claims.iat, 3600);
    assert_eq!(claims.iss, DEFAULT_JWT_ISSUER);
    assert_eq!(claims.expires_at(), now + Duration::hours(1));
}

#[test]
fn test_claims_expiry() {
    let now = Utc::now();
    let claims = Claims::new_session(Uuid::new_v4(), DEFAULT_JWT_ISSUER, now, Duration::hours(1));

    assert!(!claims.is_expired_at(now));
    assert!(!claims.is_expired_at(now + Duration::minutes(59)));
    assert!(claims.is_expired_at(now + Duration::minutes(61)));
}

#[test]
fn test_unique_jti() {
    let now = Utc::now();
    let a = Claims::new_session(Uuid::new_v4(), DEFAULT_JWT_ISSUER, now, Duration::hours(1));
    let b = Claims::new_session(Uuid::new_v4(), DEFAULT_JWT_ISSUER, now, Duration::hours(1));
    assert_ne!(a.jti, b.jti);
}

#[test]
fn test_invalid_subject() {
    let mut claims = Claims::new_session(Uuid::new_v4(), DEFAULT_JWT_ISSUER, Utc::now(), Duration::hours(1));
    claims.sub = "not-a-uuid".to_string();
    assert!(claims.admin_id().is_err());
}
