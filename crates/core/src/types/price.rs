//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are serialized as decimal strings (`"179.90"`) so a persisted cart
//! reloads to exactly the same value. Numeric JSON input (`179.9`), which is
//! what the product API sends, is accepted as well.

use std::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("Price must not be negative: {0}")]
    Negative(Decimal),
    #[error("Invalid price `{0}`")]
    Invalid(String),
}

/// A non-negative price in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero price, the identity for sums.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_string()))?;
        Self::new(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        let price: Price = "139.9".parse().unwrap();
        assert_eq!(price.display(), "$139.90");
    }

    #[test]
    fn test_price_rejects_negative() {
        assert!(matches!(
            "-1.00".parse::<Price>(),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_price_times_and_sum() {
        let a: Price = "10.50".parse().unwrap();
        let b: Price = "2.25".parse().unwrap();
        let total: Price = [a.times(2), b.times(4)].into_iter().sum();
        assert_eq!(total, "30.00".parse().unwrap());
    }

    #[test]
    fn test_price_accepts_json_number() {
        let price: Price = serde_json::from_str("179.9").unwrap();
        assert_eq!(price.display(), "$179.90");
    }

    #[test]
    fn test_price_serializes_as_string() {
        let price: Price = "179.90".parse().unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"179.90\"");
    }
}
