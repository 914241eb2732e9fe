//! Cart operation errors.
//!
//! Every failed operation leaves the cart exactly as it was. Callers decide
//! how to present a failure; [`CartError::user_message`] gives the default
//! toast-style text for each category.

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Error returned by a cart operation.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested or incremented amount exceeds available stock.
    #[error(
        "Product {product_id} out of stock: {requested} requested, {available} available"
    )]
    OutOfStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// The product isn't in the cart.
    #[error("Product {0} is not in the cart")]
    NotFound(ProductId),

    /// Stock or product lookup failed.
    #[error("Request failed: {0}")]
    RequestFailed(#[from] CatalogError),

    /// The new cart couldn't be persisted.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Human-readable message for this failure category.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::OutOfStock { .. } => "Requested quantity is out of stock",
            Self::NotFound(_) => "Product is not in the cart",
            Self::RequestFailed(_) => "Error requesting the product",
            Self::Storage(_) => "Error saving the cart",
        }
    }

    /// Whether this failure points at a broken collaborator rather than a
    /// rejected user action.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::RequestFailed(_) | Self::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(5),
            requested: 1,
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "Product 5 out of stock: 1 requested, 0 available"
        );

        let err = CartError::NotFound(ProductId::new(2));
        assert_eq!(err.to_string(), "Product 2 is not in the cart");
    }

    #[test]
    fn test_user_messages_per_category() {
        assert_eq!(
            CartError::NotFound(ProductId::new(1)).user_message(),
            "Product is not in the cart"
        );
        assert_eq!(
            CartError::RequestFailed(CatalogError::NotFound(ProductId::new(1))).user_message(),
            "Error requesting the product"
        );
        assert_eq!(
            CartError::Storage(StorageError::Unavailable("full".to_string())).user_message(),
            "Error saving the cart"
        );
    }

    #[test]
    fn test_internal_classification() {
        assert!(!CartError::NotFound(ProductId::new(1)).is_internal());
        assert!(
            !CartError::OutOfStock {
                product_id: ProductId::new(1),
                requested: 2,
                available: 1,
            }
            .is_internal()
        );
        assert!(CartError::RequestFailed(CatalogError::NotFound(ProductId::new(1))).is_internal());
    }
}
