//! Phone number type.
//!
//! The phone number is the customer's unique external identifier and their
//! login credential (verified via OTP).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input is not exactly ten digits.
    #[error("phone number must be exactly 10 digits")]
    WrongLength,
    /// The input contains a non-digit character.
    #[error("phone number must contain only digits")]
    NonDigit,
    /// The first digit is outside the Indian mobile range.
    #[error("phone number must start with 6, 7, 8, or 9")]
    InvalidPrefix,
}

/// An Indian mobile phone number.
///
/// ## Constraints
///
/// - Exactly 10 ASCII digits
/// - First digit in `6..=9` (mobile numbering range)
///
/// Country code is not stored; the messaging layer prefixes `91` when
/// dialing out.
///
/// ## Examples
///
/// ```
/// use patel_yarn_core::Phone;
///
/// assert!(Phone::parse("9876543210").is_ok());
/// assert!(Phone::parse("1234567890").is_err()); // bad prefix
/// assert!(Phone::parse("98765").is_err());      // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Length of a national mobile number.
    pub const LENGTH: usize = 10;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly 10 characters
    /// - Contains a non-digit character
    /// - Does not start with 6, 7, 8, or 9
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if s.len() != Self::LENGTH {
            return Err(PhoneError::WrongLength);
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        if !matches!(s.as_bytes().first(), Some(b'6'..=b'9')) {
            return Err(PhoneError::InvalidPrefix);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Phone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_phones() {
        assert!(Phone::parse("6000000000").is_ok());
        assert!(Phone::parse("7123456789").is_ok());
        assert!(Phone::parse("8999999999").is_ok());
        assert!(Phone::parse("9876543210").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(Phone::parse("98765"), Err(PhoneError::WrongLength)));
        assert!(matches!(
            Phone::parse("98765432101"),
            Err(PhoneError::WrongLength)
        ));
    }

    #[test]
    fn test_parse_non_digit() {
        assert!(matches!(
            Phone::parse("98765abc10"),
            Err(PhoneError::NonDigit)
        ));
        assert!(matches!(
            Phone::parse("9876 54321"),
            Err(PhoneError::NonDigit)
        ));
    }

    #[test]
    fn test_parse_invalid_prefix() {
        assert!(matches!(
            Phone::parse("1234567890"),
            Err(PhoneError::InvalidPrefix)
        ));
        assert!(matches!(
            Phone::parse("0987654321"),
            Err(PhoneError::InvalidPrefix)
        ));
        assert!(matches!(
            Phone::parse("5987654321"),
            Err(PhoneError::InvalidPrefix)
        ));
    }

    #[test]
    fn test_display() {
        let phone = Phone::parse("9876543210").unwrap();
        assert_eq!(format!("{phone}"), "9876543210");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("9876543210").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"9876543210\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }

    #[test]
    fn test_from_str() {
        let phone: Phone = "8123456789".parse().unwrap();
        assert_eq!(phone.as_str(), "8123456789");
    }
}
