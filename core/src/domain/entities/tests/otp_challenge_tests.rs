//! Unit tests for the OTP challenge entity

use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::otp_challenge::{
    OtpChallenge, DEFAULT_EXPIRATION_MINUTES, OTP_CODE_LENGTH, OTP_CODE_MAX, OTP_CODE_MIN,
};

#[test]
fn test_generate_code_format() {
    for _ in 0..500 {
        let code = OtpChallenge::generate_code();
        assert_eq!(code.len(), OTP_CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let num: u32 = code.parse().expect("Generated code should be a valid number");
        assert!((OTP_CODE_MIN..=OTP_CODE_MAX).contains(&num));
    }
}

#[test]
fn test_code_uniqueness() {
    let codes: HashSet<String> = (0..100).map(|_| OtpChallenge::generate_code()).collect();
    assert!(codes.len() > 1);
}

#[test]
fn test_issue_sets_expiry_from_now() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let challenge = OtpChallenge::issue(now, Duration::minutes(DEFAULT_EXPIRATION_MINUTES));

    assert_eq!(challenge.expires_at, now + Duration::minutes(10));
    assert_eq!(challenge.failed_attempts, 0);
    assert_eq!(challenge.code.len(), OTP_CODE_LENGTH);
}

#[test]
fn test_expiry_is_strictly_after() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let challenge = OtpChallenge::with_code("482913", now, Duration::minutes(10));

    assert!(!challenge.is_expired_at(now));
    assert!(!challenge.is_expired_at(now + Duration::minutes(10)));
    assert!(challenge.is_expired_at(now + Duration::minutes(10) + Duration::seconds(1)));
    assert!(challenge.is_expired_at(now + Duration::minutes(11)));
}

#[test]
fn test_matches_is_exact() {
    let now = Utc::now();
    let challenge = OtpChallenge::with_code("482913", now, Duration::minutes(10));

    assert!(challenge.matches("482913"));
    assert!(!challenge.matches("482914"));
    assert!(!challenge.matches(" 482913"));
    assert!(!challenge.matches("482913 "));
    assert!(!challenge.matches("48291"));
    assert!(!challenge.matches(""));
}

#[test]
fn test_failed_attempt_budget() {
    let mut challenge = OtpChallenge::with_code("482913", Utc::now(), Duration::minutes(10));

    assert!(!challenge.is_locked(None));
    assert!(!challenge.is_locked(Some(2)));

    challenge.record_failure();
    challenge.record_failure();
    assert_eq!(challenge.failed_attempts, 2);
    assert!(challenge.is_locked(Some(2)));
    assert!(!challenge.is_locked(Some(3)));
    assert!(!challenge.is_locked(None));
}

#[test]
fn test_is_redeemable() {
    let now = Utc::now();
    let mut challenge = OtpChallenge::with_code("482913", now, Duration::minutes(10));

    assert!(challenge.is_redeemable("482913", now, None));
    assert!(challenge.is_redeemable("482913", now + Duration::minutes(10), None));
    assert!(!challenge.is_redeemable("482913", now + Duration::minutes(11), None));
    assert!(!challenge.is_redeemable("111111", now, None));

    challenge.record_failure();
    assert!(!challenge.is_redeemable("482913", now, Some(1)));
    assert!(challenge.is_redeemable("482913", now, Some(2)));
}
