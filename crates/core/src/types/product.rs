//! Product display data and stock levels as served by the product API.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product display data captured into a cart entry when it's added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
}

/// Current available quantity for a product.
///
/// The stock endpoint also echoes the product id; only the amount matters.
/// A negative amount from the API is read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(deserialize_with = "clamped_amount")]
    pub amount: u32,
}

fn clamped_amount<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = i64::deserialize(deserializer)?;
    Ok(u32::try_from(amount.max(0)).unwrap_or(u32::MAX))
}

impl Stock {
    /// Whether `requested` units can be served from this stock.
    #[must_use]
    pub const fn covers(&self, requested: u32) -> bool {
        requested <= self.amount
    }
}
