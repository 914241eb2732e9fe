//! Integration tests for the RocketShoes cart.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (fake catalog, real file storage)
//! cargo test -p rocketshoes-integration-tests
//!
//! # Live API tests (requires a running product API)
//! ROCKETSHOES_API_URL=http://localhost:3333 \
//!     cargo test -p rocketshoes-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `cart_lifecycle` - Store + `JsonFileStore` + in-process catalog
//! - `live_api` - `CatalogClient` against a running API

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use rocketshoes_cart::{CatalogError, Notifier, ProductQuery, StockQuery};
use rocketshoes_core::{ProductId, ProductInfo, Stock};

/// In-process catalog whose stock levels can be changed between operations.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

#[derive(Default)]
struct CatalogState {
    products: HashMap<ProductId, (ProductInfo, u32)>,
    offline: bool,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with the given price and stock.
    #[must_use]
    pub fn with_product(self, id: i32, title: &str, price: &str, stock: u32) -> Self {
        let product = ProductInfo {
            id: ProductId::new(id),
            title: title.to_string(),
            price: price.parse().unwrap(),
            image: format!("https://cdn.example.com/shoes/{id}.jpg"),
        };
        self.state
            .lock()
            .unwrap()
            .products
            .insert(product.id, (product, stock));
        self
    }

    pub fn set_stock(&self, id: i32, stock: u32) {
        if let Some((_, amount)) = self
            .state
            .lock()
            .unwrap()
            .products
            .get_mut(&ProductId::new(id))
        {
            *amount = stock;
        }
    }

    /// Make every lookup fail as if the API were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    fn lookup(&self, product_id: ProductId) -> Result<(ProductInfo, u32), CatalogError> {
        let state = self.state.lock().unwrap();
        if state.offline {
            return Err(CatalogError::Api {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }
        state
            .products
            .get(&product_id)
            .cloned()
            .ok_or(CatalogError::NotFound(product_id))
    }
}

impl StockQuery for InMemoryCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, CatalogError> {
        self.lookup(product_id).map(|(_, amount)| Stock { amount })
    }
}

impl ProductQuery for InMemoryCatalog {
    async fn product(&self, product_id: ProductId) -> Result<ProductInfo, CatalogError> {
        self.lookup(product_id).map(|(product, _)| product)
    }
}

/// Notifier that keeps every message it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
