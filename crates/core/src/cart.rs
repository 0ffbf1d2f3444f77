//! The shopping cart collection.
//!
//! A [`Cart`] is the authoritative view of what the shopper intends to buy.
//! It is a plain owned value with no I/O: the storefront persists it into the
//! server session after every mutation, and the serialized form round-trips
//! losslessly, so a cart survives page reloads.
//!
//! # Invariants
//!
//! - At most one entry per product id.
//! - Every entry's quantity is >= 1; setting a quantity to zero removes the
//!   entry.
//!
//! Both mutators upsert: [`Cart::add_product`] inserts or increments, and
//! [`Cart::set_quantity`] inserts or replaces. The unit price carried on each
//! entry is a display snapshot only - the charged amount is always recomputed
//! server-side from current catalog prices at checkout.
//!
//! The cart does not enforce a stock ceiling; stock sufficiency is checked
//! against the catalog by the endpoints that mutate the cart.

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, Rupees};

/// One line of a cart: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Unit price snapshot, in whole rupees.
    pub unit_price: Rupees,
    /// How many units. Always >= 1 while the entry exists.
    pub quantity: u32,
}

/// An ordered collection of [`CartItem`]s, at most one per product.
///
/// Insertion order is preserved for display but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity is incremented;
    /// otherwise a new entry is appended. Adding zero units of an absent
    /// product is a no-op.
    pub fn add_product(&mut self, product_id: ProductId, unit_price: Rupees, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity += quantity;
        } else {
            self.items.push(CartItem {
                product_id,
                unit_price,
                quantity,
            });
        }
    }

    /// Set the quantity for a product to an absolute value.
    ///
    /// Upserts: an existing entry is overwritten, an absent product is
    /// inserted. A quantity of zero removes the entry.
    pub fn set_quantity(&mut self, product_id: ProductId, unit_price: Rupees, quantity: u32) {
        if quantity == 0 {
            self.remove_product(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
            item.unit_price = unit_price;
        } else {
            self.items.push(CartItem {
                product_id,
                unit_price,
                quantity,
            });
        }
    }

    /// Remove a product's entry. Idempotent if the product is absent.
    pub fn remove_product(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Empty the cart. Invoked after a confirmed order.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `unit_price * quantity` over all entries.
    #[must_use]
    pub fn total_price(&self) -> Rupees {
        self.items
            .iter()
            .map(|i| i.unit_price.times(i.quantity))
            .sum()
    }

    /// Sum of quantities over all entries.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// The quantity for a product, or 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The cart's entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pid(id: i32) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_add_inserts_new_entry() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 2);

        assert_eq!(cart.quantity_of(pid(1)), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_increments_existing_entry() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 2);
        cart.add_product(pid(1), Rupees::new(250), 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(pid(1)), 5);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 5);
        cart.set_quantity(pid(1), Rupees::new(250), 2);

        assert_eq!(cart.quantity_of(pid(1)), 2);
    }

    #[test]
    fn test_set_quantity_upserts_when_absent() {
        let mut cart = Cart::new();
        cart.set_quantity(pid(7), Rupees::new(120), 4);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(pid(7)), 4);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 5);
        cart.set_quantity(pid(1), Rupees::new(250), 0);

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(pid(1)), 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 1);
        cart.remove_product(pid(1));
        cart.remove_product(pid(1));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 1);
        cart.add_product(pid(2), Rupees::new(100), 3);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Rupees::new(0));
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 2);
        cart.add_product(pid(2), Rupees::new(100), 3);

        assert_eq!(cart.total_price(), Rupees::new(800));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_no_duplicate_product_ids_under_mixed_ops() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 1);
        cart.set_quantity(pid(1), Rupees::new(250), 4);
        cart.add_product(pid(1), Rupees::new(250), 2);
        cart.remove_product(pid(2));
        cart.set_quantity(pid(2), Rupees::new(90), 1);
        cart.add_product(pid(2), Rupees::new(90), 1);

        let mut ids: Vec<i32> = cart.items().iter().map(|i| i.product_id.as_i32()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cart.items().len());
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut cart = Cart::new();
        cart.add_product(pid(1), Rupees::new(250), 2);
        cart.add_product(pid(9), Rupees::new(75), 1);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, cart);
        assert_eq!(restored.total_price(), cart.total_price());
        assert_eq!(restored.item_count(), cart.item_count());
    }
}
