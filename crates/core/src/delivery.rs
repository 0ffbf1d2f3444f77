//! Delivery charge resolution.
//!
//! A flat two-tier table keyed by destination pincode: local deliveries
//! (Bengaluru-side pincodes below the threshold) ship for less. The checkout
//! flow calls this once and threads the result into both the displayed
//! summary and the gateway order amount, so the two cannot disagree.

use crate::types::Rupees;

/// First pincode that falls into the outstation tier.
pub const OUTSTATION_THRESHOLD: i32 = 560_055;

/// Charge for pincodes below [`OUTSTATION_THRESHOLD`].
pub const LOCAL_CHARGE: Rupees = Rupees::new(100);

/// Charge for pincodes at or above [`OUTSTATION_THRESHOLD`].
pub const OUTSTATION_CHARGE: Rupees = Rupees::new(200);

/// Resolve the flat delivery charge for a destination pincode.
#[must_use]
pub const fn delivery_charge(pincode: i32) -> Rupees {
    if pincode < OUTSTATION_THRESHOLD {
        LOCAL_CHARGE
    } else {
        OUTSTATION_CHARGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_tier() {
        assert_eq!(delivery_charge(559_999), Rupees::new(100));
        assert_eq!(delivery_charge(100_000), Rupees::new(100));
    }

    #[test]
    fn test_threshold_is_outstation() {
        // 560055 itself pays the higher tier
        assert_eq!(delivery_charge(560_055), Rupees::new(200));
    }

    #[test]
    fn test_outstation_tier() {
        assert_eq!(delivery_charge(560_100), Rupees::new(200));
        assert_eq!(delivery_charge(999_999), Rupees::new(200));
    }
}
