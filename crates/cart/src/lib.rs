//! RocketShoes Cart - Stock-validated shopping cart store.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the cart list and is injected into whatever drives it
//!   (the CLI, a UI layer, tests). There is no global cart.
//! - Remote lookups go through the [`StockQuery`] and [`ProductQuery`] seams;
//!   [`CatalogClient`] implements both over the REST product API.
//! - Persistence goes through the [`KeyValueStore`] seam: one JSON blob under
//!   one key, overwritten after every successful mutation.
//! - Operations return errors as values. Presenting them is the caller's
//!   policy, see [`ReportExt::report`] and [`Notifier`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::{CartStore, CatalogClient, JsonFileStore, ReportExt, TracingNotifier};
//!
//! let catalog = CatalogClient::new(api_url, Duration::from_secs(300))?;
//! let storage = JsonFileStore::new("rocketshoes-storage.json");
//! let mut store = CartStore::load(catalog, storage)?;
//!
//! store.add_product(ProductId::new(1)).await.report(&TracingNotifier);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;

pub use catalog::{CatalogClient, CatalogError, MAX_PRODUCT_TTL, ProductQuery, StockQuery};
pub use error::CartError;
pub use notify::{Notifier, ReportExt, TracingNotifier};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, DEFAULT_STORAGE_KEY, Mutation};
