//! Patel Yarn House Core - Shared types and domain logic.
//!
//! This crate provides the common types used across all Patel Yarn House
//! components:
//! - `storefront` - Public-facing shop (catalog, cart, checkout)
//! - `admin` - Internal back office (catalog and order management)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, phone numbers, and money
//! - [`cart`] - The shopping cart collection and its invariants
//! - [`delivery`] - Delivery charge resolution by pincode

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod delivery;
pub mod types;

pub use cart::{Cart, CartItem};
pub use delivery::delivery_charge;
pub use types::*;
