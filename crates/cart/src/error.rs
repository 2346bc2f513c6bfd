//! Typed error taxonomy for cart operations.

use thiserror::Error;

use rocket_shoes_core::ProductId;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Errors produced by cart operations.
///
/// These never cross the public mutator boundary: the store maps them to
/// [`crate::notify::Notice`]s so callers observe fire-and-forget
/// semantics while the cause is retained for logging.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds the available stock.
    #[error("out of stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart mirror failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Encoding the cart mirror failed.
    #[error("mirror encode error: {0}")]
    Mirror(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 6,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "out of stock for product 1: requested 6, available 5"
        );

        let err = CartError::NotInCart(ProductId::new(9));
        assert_eq!(err.to_string(), "product 9 is not in the cart");
    }
}
