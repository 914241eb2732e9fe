//! REST client for the product API.
//!
//! Uses `reqwest` for HTTP. Product display data is cached with `moka`;
//! stock is always fetched fresh since it gates every quantity change.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rocketshoes_core::{ProductId, ProductInfo, Stock};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{CatalogError, ProductQuery, StockQuery};

/// Maximum number of products kept in the display-data cache.
const PRODUCT_CACHE_CAPACITY: u64 = 1000;

/// Longest accepted product cache TTL (one year).
pub const MAX_PRODUCT_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Client for the product and stock endpoints.
///
/// Cheaply cloneable; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    products: Cache<ProductId, ProductInfo>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `http://localhost:3333`
    /// * `product_ttl` - How long product display data stays cached
    ///
    /// # Errors
    ///
    /// Returns error if `product_ttl` exceeds [`MAX_PRODUCT_TTL`] or the HTTP
    /// client fails to build.
    pub fn new(mut base_url: Url, product_ttl: Duration) -> Result<Self, CatalogError> {
        if product_ttl > MAX_PRODUCT_TTL {
            return Err(CatalogError::CacheTtl(product_ttl));
        }

        // Url::join replaces the last path segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let products = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(product_ttl)
            .build();

        let client = reqwest::Client::builder()
            .user_agent(concat!("rocketshoes-cart/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url,
                products,
            }),
        })
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build `{base}/{resource}/{id}`.
    fn endpoint(&self, resource: &str, product_id: ProductId) -> Result<Url, CatalogError> {
        Ok(self
            .inner
            .base_url
            .join(&format!("{resource}/{product_id}"))?)
    }

    /// GET a JSON document for one product.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        product_id: ProductId,
    ) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(product_id));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Product API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse product API response"
            );
            CatalogError::Parse(e)
        })
    }
}

impl StockQuery for CatalogClient {
    #[instrument(skip(self))]
    async fn stock(&self, product_id: ProductId) -> Result<Stock, CatalogError> {
        let url = self.endpoint("stock", product_id)?;
        self.get_json(url, product_id).await
    }
}

impl ProductQuery for CatalogClient {
    #[instrument(skip(self))]
    async fn product(&self, product_id: ProductId) -> Result<ProductInfo, CatalogError> {
        if let Some(product) = self.inner.products.get(&product_id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let url = self.endpoint("products", product_id)?;
        let product: ProductInfo = self.get_json(url, product_id).await?;

        self.inner.products.insert(product_id, product.clone()).await;

        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(Url::parse(base).unwrap(), Duration::from_secs(300)).unwrap()
    }

    #[test]
    fn test_endpoint_from_bare_host() {
        let client = client("http://localhost:3333");
        let url = client.endpoint("stock", ProductId::new(4)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/stock/4");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client("https://api.example.com/v1");
        assert_eq!(client.base_url().as_str(), "https://api.example.com/v1/");
        let url = client.endpoint("products", ProductId::new(12)).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/products/12");
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let client = client("https://api.example.com/v1/");
        let url = client.endpoint("stock", ProductId::new(1)).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/stock/1");
    }

    #[test]
    fn test_oversize_product_ttl_is_rejected() {
        let base = Url::parse("http://localhost:3333").unwrap();
        let result = CatalogClient::new(base.clone(), Duration::from_secs(99_999_999_999));
        assert!(matches!(result, Err(CatalogError::CacheTtl(_))));

        assert!(CatalogClient::new(base, MAX_PRODUCT_TTL).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_api_is_http_error() {
        // Port 9 (discard) on localhost is never serving HTTP in tests
        let client = client("http://127.0.0.1:9");
        let err = client.stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Http(_)));
    }
}
