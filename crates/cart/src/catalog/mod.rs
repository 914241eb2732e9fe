//! Product catalog lookups: current stock and product display data.
//!
//! The cart store only sees the [`StockQuery`] and [`ProductQuery`] traits.
//! [`CatalogClient`] implements both against the REST product API:
//!
//! - `GET {base}/stock/{id}` returns `{ "id": 1, "amount": 3 }`
//! - `GET {base}/products/{id}` returns `{ "id": 1, "title": ..., "price": ..., "image": ... }`

mod client;

use rocketshoes_core::{ProductId, ProductInfo, Stock};
use thiserror::Error;

pub use client::{CatalogClient, MAX_PRODUCT_TTL};

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL couldn't be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Product cache TTL is longer than the cache supports.
    #[error("Product cache TTL too long: {0:?}")]
    CacheTtl(std::time::Duration),

    /// The API has no record for this product.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches the current available quantity of a product.
pub trait StockQuery {
    fn stock(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Stock, CatalogError>> + Send;
}

/// Fetches a product's display data.
pub trait ProductQuery {
    fn product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<ProductInfo, CatalogError>> + Send;
}
