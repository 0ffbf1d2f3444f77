//! One-time-code issue and verification.
//!
//! The store is an owned object injected through `AppState`, not a
//! module-level singleton, so tests can construct isolated instances. Codes
//! live in process memory only: a restart invalidates outstanding codes,
//! which is acceptable for a five-minute window.
//!
//! Every time-dependent method takes `now` explicitly; callers pass
//! `Utc::now()` and tests pass fixed instants.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use patel_yarn_core::Phone;

/// How long an issued code stays valid.
const CODE_TTL_MINUTES: i64 = 5;

/// A stored code awaiting verification.
#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: DateTime<Utc>,
}

/// In-memory store of outstanding login codes, one per phone number.
///
/// A new request for a phone overwrites any prior entry, so at most one code
/// is live per phone. Verification is single-use: a matching code deletes
/// the entry. A wrong code leaves the entry in place so the customer can
/// retry within the window; an expired entry is deleted on read.
#[derive(Debug, Default)]
pub struct OtpStore {
    entries: Mutex<HashMap<Phone, OtpEntry>>,
}

impl OtpStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a uniform six-digit code and store it for `phone`,
    /// overwriting any prior entry. Returns the code for dispatch.
    pub fn issue(&self, phone: &Phone, now: DateTime<Utc>) -> String {
        let code = format!("{:06}", rand::rng().random_range(0..1_000_000u32));
        let entry = OtpEntry {
            code: code.clone(),
            expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
        };

        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(phone.clone(), entry);
        }

        code
    }

    /// Verify a submitted code for `phone`.
    ///
    /// Returns `true` exactly once per issued code: on a match the entry is
    /// deleted, so replaying the same code fails. Absent, expired, or
    /// mismatched codes return `false`; only expiry deletes on failure.
    pub fn verify(&self, phone: &Phone, code: &str, now: DateTime<Utc>) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };

        let Some(entry) = entries.get(phone) else {
            return false;
        };

        if now >= entry.expires_at {
            entries.remove(phone);
            return false;
        }

        if entry.code == code {
            entries.remove(phone);
            return true;
        }

        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn phone() -> Phone {
        Phone::parse("9876543210").unwrap()
    }

    #[test]
    fn test_issue_generates_six_digits() {
        let store = OtpStore::new();
        let code = store.issue(&phone(), Utc::now());

        assert_eq!(code.len(), 6);
        assert!(code.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_verify_succeeds_once_and_only_once() {
        let store = OtpStore::new();
        let now = Utc::now();
        let code = store.issue(&phone(), now);

        assert!(store.verify(&phone(), &code, now));
        // Replay after success must fail
        assert!(!store.verify(&phone(), &code, now));
    }

    #[test]
    fn test_verify_wrong_code_allows_retry() {
        let store = OtpStore::new();
        let now = Utc::now();
        let code = store.issue(&phone(), now);

        assert!(!store.verify(&phone(), "000000", now));
        // The entry survived the failed attempt
        assert!(store.verify(&phone(), &code, now));
    }

    #[test]
    fn test_verify_absent_phone() {
        let store = OtpStore::new();
        assert!(!store.verify(&phone(), "123456", Utc::now()));
    }

    #[test]
    fn test_verify_rejects_at_exact_expiry() {
        let store = OtpStore::new();
        let issued_at = Utc::now();
        let code = store.issue(&phone(), issued_at);

        // Valid at T + 5 minutes - 1 second
        let just_before = issued_at + Duration::minutes(CODE_TTL_MINUTES) - Duration::seconds(1);
        let at_expiry = issued_at + Duration::minutes(CODE_TTL_MINUTES);

        let other = OtpStore::new();
        let code2 = other.issue(&phone(), issued_at);
        assert!(other.verify(&phone(), &code2, just_before));

        // Rejected at exactly T + 5 minutes, and the entry is gone
        assert!(!store.verify(&phone(), &code, at_expiry));
        assert!(!store.verify(&phone(), &code, issued_at));
    }

    #[test]
    fn test_reissue_overwrites_prior_code() {
        let store = OtpStore::new();
        let now = Utc::now();
        let first = store.issue(&phone(), now);
        let second = store.issue(&phone(), now);

        if first != second {
            assert!(!store.verify(&phone(), &first, now));
        }
        assert!(store.verify(&phone(), &second, now));
    }
}
