//! Integration tests for the OTP credential flow.

use chrono::{Duration, Utc};

use patel_yarn_core::Phone;
use patel_yarn_storefront::services::OtpStore;

fn phone(s: &str) -> Phone {
    Phone::parse(s).expect("valid test phone")
}

#[test]
fn test_code_verifies_once_and_only_once() {
    let store = OtpStore::new();
    let now = Utc::now();
    let p = phone("9876543210");

    let code = store.issue(&p, now);

    assert!(store.verify(&p, &code, now));
    assert!(!store.verify(&p, &code, now), "replay must fail");
}

#[test]
fn test_code_expires_at_five_minutes() {
    let store = OtpStore::new();
    let issued_at = Utc::now();
    let p = phone("9876543210");

    let code = store.issue(&p, issued_at);

    // Any attempt at or after T + 5 minutes is rejected
    assert!(!store.verify(&p, &code, issued_at + Duration::minutes(5)));
    // And the expired entry was deleted on read
    assert!(!store.verify(&p, &code, issued_at));
}

#[test]
fn test_code_valid_just_inside_window() {
    let store = OtpStore::new();
    let issued_at = Utc::now();
    let p = phone("9876543210");

    let code = store.issue(&p, issued_at);

    let just_inside = issued_at + Duration::minutes(5) - Duration::seconds(1);
    assert!(store.verify(&p, &code, just_inside));
}

#[test]
fn test_codes_are_per_phone() {
    let store = OtpStore::new();
    let now = Utc::now();
    let first = phone("9876543210");
    let second = phone("8123456789");

    let code = store.issue(&first, now);

    assert!(!store.verify(&second, &code, now));
    assert!(store.verify(&first, &code, now));
}

#[test]
fn test_reissue_invalidates_previous_code() {
    let store = OtpStore::new();
    let now = Utc::now();
    let p = phone("7012345678");

    let old_code = store.issue(&p, now);
    let new_code = store.issue(&p, now);

    if old_code != new_code {
        assert!(!store.verify(&p, &old_code, now));
    }
    assert!(store.verify(&p, &new_code, now));
}

#[test]
fn test_wrong_code_does_not_burn_the_entry() {
    let store = OtpStore::new();
    let now = Utc::now();
    let p = phone("9000000001");

    let code = store.issue(&p, now);

    // Several wrong guesses within the window
    assert!(!store.verify(&p, "000000", now));
    assert!(!store.verify(&p, "999999", now));

    // The real code still works
    assert!(store.verify(&p, &code, now));
}

#[test]
fn test_phone_validation_gate() {
    // The endpoints parse before touching the store; the same rules apply.
    assert!(Phone::parse("9876543210").is_ok());
    assert!(Phone::parse("5876543210").is_err());
    assert!(Phone::parse("98765").is_err());
    assert!(Phone::parse("98765432100").is_err());
    assert!(Phone::parse("98765abc10").is_err());
}
