//! Integration tests for cart invariants and the checkout amount law.

use patel_yarn_core::{Cart, ProductId, Rupees, delivery_charge};

fn pid(id: i32) -> ProductId {
    ProductId::new(id)
}

// =============================================================================
// Cart invariants under operation sequences
// =============================================================================

#[test]
fn test_no_duplicate_entries_under_any_sequence() {
    // A fixed tour through every mutator, checking the uniqueness and
    // positive-quantity invariants after each step.
    let mut cart = Cart::new();

    let steps: Vec<Box<dyn Fn(&mut Cart)>> = vec![
        Box::new(|c| c.add_product(pid(1), Rupees::new(250), 2)),
        Box::new(|c| c.add_product(pid(1), Rupees::new(250), 1)),
        Box::new(|c| c.set_quantity(pid(1), Rupees::new(250), 7)),
        Box::new(|c| c.add_product(pid(2), Rupees::new(100), 1)),
        Box::new(|c| c.set_quantity(pid(3), Rupees::new(90), 2)),
        Box::new(|c| c.remove_product(pid(2))),
        Box::new(|c| c.remove_product(pid(2))),
        Box::new(|c| c.set_quantity(pid(1), Rupees::new(250), 0)),
        Box::new(|c| c.add_product(pid(1), Rupees::new(250), 4)),
    ];

    for step in steps {
        step(&mut cart);

        let mut ids: Vec<i32> = cart.items().iter().map(|i| i.product_id.as_i32()).collect();
        ids.sort_unstable();
        let len_before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), len_before, "duplicate product entry");
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    assert_eq!(cart.quantity_of(pid(1)), 4);
    assert_eq!(cart.quantity_of(pid(3)), 2);
    assert_eq!(cart.quantity_of(pid(2)), 0);
}

#[test]
fn test_totals_always_match_entries() {
    let mut cart = Cart::new();
    cart.add_product(pid(1), Rupees::new(250), 2);
    cart.add_product(pid(2), Rupees::new(100), 3);
    cart.set_quantity(pid(1), Rupees::new(250), 1);

    let expected_total: i64 = cart
        .items()
        .iter()
        .map(|i| i.unit_price.as_i64() * i64::from(i.quantity))
        .sum();
    let expected_count: u32 = cart.items().iter().map(|i| i.quantity).sum();

    assert_eq!(cart.total_price().as_i64(), expected_total);
    assert_eq!(cart.item_count(), expected_count);
}

#[test]
fn test_cart_survives_serialization() {
    let mut cart = Cart::new();
    cart.add_product(pid(5), Rupees::new(320), 2);
    cart.add_product(pid(9), Rupees::new(180), 1);

    // Round-trip through the persisted JSON form, as the session layer does
    let json = serde_json::to_string(&cart).expect("serializes");
    let restored: Cart = serde_json::from_str(&json).expect("deserializes");

    assert_eq!(restored, cart);

    // And a second round trip is a fixed point
    let json2 = serde_json::to_string(&restored).expect("serializes");
    assert_eq!(json, json2);
}

// =============================================================================
// Delivery tiers and the gateway amount law
// =============================================================================

#[test]
fn test_delivery_tier_boundaries() {
    assert_eq!(delivery_charge(559_999), Rupees::new(100));
    assert_eq!(delivery_charge(560_055), Rupees::new(200));
    assert_eq!(delivery_charge(560_100), Rupees::new(200));
}

#[test]
fn test_gateway_amount_for_500_rupee_cart_with_local_delivery() {
    // Cart totalling 500, pincode in the 100-rupee tier: the gateway order
    // amount must be exactly (500 + 100) * 100 paise.
    let mut cart = Cart::new();
    cart.add_product(pid(1), Rupees::new(250), 2);
    assert_eq!(cart.total_price(), Rupees::new(500));

    let charge = delivery_charge(559_999);
    let amount = (cart.total_price() + charge).to_paise();

    assert_eq!(amount.as_i64(), 60_000);
}
