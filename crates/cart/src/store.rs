//! The cart store.
//!
//! [`CartStore`] owns the cart list. Each operation performs its remote
//! lookups first, then computes the new list on a copy, persists it, and only
//! then swaps it in and publishes it to subscribers. A failure at any step
//! leaves the cart untouched.

use std::num::NonZeroU32;

use rocketshoes_core::{Cart, CartEntry, ProductId, ProductInfo, Stock};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::catalog::{ProductQuery, StockQuery};
use crate::error::CartError;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// What a successful operation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// A new entry with amount 1 was appended.
    Inserted,
    /// An existing entry's amount went up by one.
    Incremented { amount: u32 },
    /// An entry was deleted.
    Removed,
    /// An entry's amount was overwritten.
    AmountSet { amount: u32 },
    /// Nothing to do (non-positive amount requested).
    Unchanged,
}

/// Stock-validated cart backed by a catalog and a key-value store.
pub struct CartStore<C, S> {
    catalog: C,
    storage: S,
    key: String,
    cart: Cart,
    updates: watch::Sender<Cart>,
}

impl<C, S> CartStore<C, S>
where
    C: StockQuery + ProductQuery,
    S: KeyValueStore,
{
    /// Load the cart persisted under [`DEFAULT_STORAGE_KEY`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend can't be read.
    pub fn load(catalog: C, storage: S) -> Result<Self, StorageError> {
        Self::load_with_key(catalog, storage, DEFAULT_STORAGE_KEY)
    }

    /// Load the cart persisted under `key`.
    ///
    /// A missing value is an empty cart. A value that doesn't parse as a cart
    /// is logged and replaced by an empty cart on the next write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend can't be read.
    pub fn load_with_key(
        catalog: C,
        storage: S,
        key: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let key = key.into();
        let cart = match storage.get(&key)? {
            Some(blob) => parse_cart(&key, &blob),
            None => Cart::new(),
        };
        debug!(key = %key, entries = cart.len(), "Cart loaded");

        let (updates, _) = watch::channel(cart.clone());
        Ok(Self {
            catalog,
            storage,
            key,
            cart,
            updates,
        })
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Receive the cart after every successful mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.updates.subscribe()
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Storage backend the cart is persisted to.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Catalog used for stock and product lookups.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart is incremented if stock strictly exceeds
    /// its current amount. A new product is appended with amount 1 if stock is
    /// positive; its display data is fetched only in that case.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` if stock doesn't cover one more unit
    /// - `CartError::RequestFailed` if a lookup fails
    /// - `CartError::Storage` if the new cart can't be persisted
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<Mutation, CartError> {
        let stock = self.catalog.stock(product_id).await?;

        if let Some(current) = self.cart.get(product_id).map(CartEntry::amount) {
            // stock > current, i.e. one more unit fits
            let Some(requested) = current.checked_add(1).filter(|&n| stock.covers(n)) else {
                return Err(out_of_stock(product_id, u64::from(current) + 1, stock));
            };

            let mut cart = self.cart.clone();
            cart.increment(product_id);
            self.commit(cart)?;
            debug!(amount = requested, "Product amount incremented");
            return Ok(Mutation::Incremented { amount: requested });
        }

        if !stock.covers(1) {
            return Err(out_of_stock(product_id, 1, stock));
        }

        let product = self.catalog.product(product_id).await?;
        let product = ProductInfo {
            id: product_id,
            ..product
        };

        let mut cart = self.cart.clone();
        cart.insert(product);
        self.commit(cart)?;
        debug!("Product added to cart");
        Ok(Mutation::Inserted)
    }

    /// Delete a product's entry.
    ///
    /// # Errors
    ///
    /// - `CartError::NotFound` if the product isn't in the cart
    /// - `CartError::Storage` if the new cart can't be persisted
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<Mutation, CartError> {
        let mut cart = self.cart.clone();
        if cart.remove(product_id).is_none() {
            warn!("Remove requested for product not in cart");
            return Err(CartError::NotFound(product_id));
        }

        self.commit(cart)?;
        debug!("Product removed from cart");
        Ok(Mutation::Removed)
    }

    /// Set a product's amount.
    ///
    /// A non-positive `amount` is ignored without any lookup.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` if `amount` exceeds available stock
    /// - `CartError::NotFound` if the product isn't in the cart
    /// - `CartError::RequestFailed` if the stock lookup fails
    /// - `CartError::Storage` if the new cart can't be persisted
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Mutation, CartError> {
        let Some(requested) = u64::try_from(amount).ok().filter(|&n| n > 0) else {
            debug!("Ignoring non-positive amount");
            return Ok(Mutation::Unchanged);
        };

        let stock = self.catalog.stock(product_id).await?;

        let Some(amount) = u32::try_from(requested)
            .ok()
            .filter(|&amount| stock.covers(amount))
            .and_then(NonZeroU32::new)
        else {
            return Err(out_of_stock(product_id, requested, stock));
        };

        let mut cart = self.cart.clone();
        if cart.set_amount(product_id, amount).is_none() {
            warn!("Amount update requested for product not in cart");
            return Err(CartError::NotFound(product_id));
        }

        self.commit(cart)?;
        debug!(amount = amount.get(), "Product amount set");
        Ok(Mutation::AmountSet {
            amount: amount.get(),
        })
    }

    /// Persist `cart`, then make it current and publish it.
    fn commit(&mut self, cart: Cart) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&cart)?;
        self.storage.set(&self.key, &blob)?;
        self.cart = cart;
        self.updates.send_replace(self.cart.clone());
        Ok(())
    }
}

fn out_of_stock(product_id: ProductId, requested: u64, stock: Stock) -> CartError {
    warn!(
        product_id = %product_id,
        requested,
        available = stock.amount,
        "Requested quantity out of stock"
    );
    CartError::OutOfStock {
        product_id,
        requested,
        available: stock.amount,
    }
}

/// Parse a persisted blob, repairing or discarding it as needed.
fn parse_cart(key: &str, blob: &str) -> Cart {
    match serde_json::from_str::<Vec<CartEntry>>(blob) {
        Ok(entries) => {
            let (cart, dropped) = Cart::repaired(entries);
            if dropped > 0 {
                warn!(key = %key, dropped, "Discarded invalid persisted cart entries");
            }
            cart
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Persisted cart is unreadable, starting empty");
            Cart::new()
        }
    }
}
