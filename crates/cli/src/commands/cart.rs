//! Cart commands.
//!
//! Each command opens the persisted cart, runs one store operation, and
//! reports failures through the tracing notifier. Collaborator failures
//! (API down, storage unwritable) are also captured to Sentry.
//!
//! Output, including the `list` table, is emitted as `info!` events, so a
//! `RUST_LOG` level above `info` (e.g. `warn`) hides it.

use rocketshoes_cart::{
    CartError, CartStore, CatalogClient, JsonFileStore, Mutation, ReportExt, TracingNotifier,
};
use rocketshoes_core::ProductId;
use tracing::info;

use crate::config::CliConfig;

type Store = CartStore<CatalogClient, JsonFileStore>;

/// Open the cart persisted at the configured storage location.
///
/// # Errors
///
/// Returns an error if the HTTP client can't be built or storage can't be read.
pub fn open(config: &CliConfig) -> Result<Store, Box<dyn std::error::Error>> {
    let catalog = CatalogClient::new(config.api_url.clone(), config.product_cache_ttl)?;
    let storage = JsonFileStore::new(&config.storage_path);
    let store = CartStore::load_with_key(catalog, storage, &config.storage_key)?;
    Ok(store)
}

/// Print the cart contents and totals.
pub fn list(store: &Store) {
    let cart = store.cart();
    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    for entry in cart {
        let product = entry.product();
        info!(
            "  #{} {} x{} @ {} = {}",
            product.id,
            product.title,
            entry.amount(),
            product.price.display(),
            entry.line_price().display()
        );
    }
    info!(
        "{} products, {} items, subtotal {}",
        cart.len(),
        cart.item_count(),
        cart.subtotal().display()
    );
}

/// Add one unit of a product. Returns whether the cart changed.
pub async fn add(store: &mut Store, product_id: ProductId) -> bool {
    let result = store.add_product(product_id).await;
    finish(store, result)
}

/// Remove a product. Returns whether the cart changed.
pub fn remove(store: &mut Store, product_id: ProductId) -> bool {
    let result = store.remove_product(product_id);
    finish(store, result)
}

/// Set a product's amount. Returns `false` only on failure; a non-positive
/// amount is accepted and ignored.
pub async fn update(store: &mut Store, product_id: ProductId, amount: i64) -> bool {
    let result = store.update_product_amount(product_id, amount).await;
    finish(store, result)
}

/// Report the outcome and show the resulting cart.
fn finish(store: &Store, result: Result<Mutation, CartError>) -> bool {
    if let Err(e) = &result
        && e.is_internal()
    {
        let event_id = sentry::capture_error(e);
        tracing::debug!(sentry_event_id = %event_id, "Cart failure captured");
    }

    match result.report(&TracingNotifier) {
        Some(Mutation::Unchanged) => {
            info!("Nothing to update");
            true
        }
        Some(mutation) => {
            info!(?mutation, "Cart updated");
            list(store);
            true
        }
        None => false,
    }
}
