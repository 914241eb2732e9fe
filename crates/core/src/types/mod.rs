//! Core types for RocketShoes.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, CartEntry};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{ProductInfo, Stock};
