//! RocketShoes Core - Shared cart and product types.
//!
//! This crate provides the types shared by every RocketShoes component:
//! - `cart` - The cart store and its storage/catalog adapters
//! - `cli` - Command-line driver for the cart store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. Cart invariants that don't need a remote lookup
//! (uniqueness per product, amounts of at least one) live here.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, product display data, and the cart list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
