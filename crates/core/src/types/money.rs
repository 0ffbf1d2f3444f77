//! Money types.
//!
//! The whole system works in integer rupees: catalog prices, cart totals,
//! delivery charges, and the recorded `price_paid` on orders. The payment
//! gateway denominates amounts in paise (the smallest currency unit), so
//! [`Rupees::to_paise`] is the single conversion site, called exactly once
//! when the gateway order is created.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// An amount in whole Indian rupees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupees(i64);

impl Rupees {
    /// Create an amount from a whole-rupee value.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the underlying rupee value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Convert to paise for the payment gateway (1 rupee = 100 paise).
    #[must_use]
    pub const fn to_paise(self) -> Paise {
        Paise(self.0 * 100)
    }

    /// Multiply a unit price by a quantity.
    #[must_use]
    pub const fn times(self, qty: u32) -> Self {
        Self(self.0 * qty as i64)
    }
}

impl Add for Rupees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Rupees {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self(0), Add::add)
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

impl From<i64> for Rupees {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl From<Rupees> for i64 {
    fn from(amount: Rupees) -> Self {
        amount.0
    }
}

/// An amount in paise, the gateway's wire denomination.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Paise(i64);

impl Paise {
    /// Create an amount from a paise value.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the underlying paise value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Paise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.0)
    }
}

// SQLx support (with postgres feature): stored as BIGINT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Rupees {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Rupees {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Rupees {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_paise() {
        assert_eq!(Rupees::new(600).to_paise(), Paise::new(60_000));
        assert_eq!(Rupees::new(0).to_paise(), Paise::new(0));
        assert_eq!(Rupees::new(1).to_paise(), Paise::new(100));
    }

    #[test]
    fn test_times() {
        assert_eq!(Rupees::new(250).times(3), Rupees::new(750));
        assert_eq!(Rupees::new(250).times(0), Rupees::new(0));
    }

    #[test]
    fn test_sum() {
        let total: Rupees = [Rupees::new(100), Rupees::new(200), Rupees::new(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Rupees::new(350));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Rupees::new(500)), "₹500");
        assert_eq!(format!("{}", Paise::new(60_000)), "60000p");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Rupees::new(499)).unwrap();
        assert_eq!(json, "499");

        let parsed: Rupees = serde_json::from_str("499").unwrap();
        assert_eq!(parsed, Rupees::new(499));
    }
}
