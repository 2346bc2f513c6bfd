//! The cart store: canonical cart state, persistence, stock-gated mutations.
//!
//! One `CartStore` is owned by the application root and handed to consumers
//! by reference. State is published through a `tokio::sync::watch` channel:
//! every mutator snapshots the current list at entry, computes a full
//! replacement, persists it, and then publishes it. Two operations issued
//! back-to-back before either resolves therefore race last-write-wins —
//! the single-writer discipline is a convention, not an enforcement, and
//! callers needing per-product serialization must provide it themselves.
//!
//! Mutators are fire-and-forget: they always return `()`, and failures
//! surface as exactly one [`Notice`] through the injected [`Notifier`].

use std::sync::Arc;

use tokio::sync::watch;

use rocket_shoes_core::ProductId;

use crate::catalog::Catalog;
use crate::error::CartError;
use crate::models::CartItem;
use crate::notify::{Notice, Notifier};
use crate::storage::CartStorage;

/// Quantity change request for a product already expected in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Requested total quantity. Zero is a silent no-op (the guard path
    /// for decrementing past one).
    pub amount: u32,
}

/// The cart state container.
///
/// Generic over its seams so tests run against an in-memory catalog and
/// storage; the real application wires `HttpCatalog` and `FileStorage`.
pub struct CartStore<C, S> {
    catalog: C,
    storage: S,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
    state: watch::Sender<Vec<CartItem>>,
}

impl<C: Catalog, S: CartStorage> CartStore<C, S> {
    /// Create a cart store, loading the initial cart from the persisted
    /// mirror.
    ///
    /// An absent slot or a malformed mirror yields an empty cart; the
    /// malformed case is logged and the slot is overwritten on the next
    /// successful mutation.
    pub fn new(
        catalog: C,
        storage: S,
        notifier: Arc<dyn Notifier>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let initial = load_mirror(&storage, &storage_key);
        let (state, _) = watch::channel(initial);

        Self {
            catalog,
            storage,
            notifier,
            storage_key,
            state,
        }
    }

    /// Snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Vec<CartItem> {
        self.state.borrow().clone()
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Subscribe to cart state publications.
    ///
    /// The receiver observes every committed mutation; it starts out
    /// holding the current list.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.state.subscribe()
    }

    /// Add one unit of a product to the cart.
    ///
    /// If the product is already in the cart this delegates to
    /// [`Self::update_product_amount`] with the incremented total, reusing
    /// its stock check, persistence and notices. Otherwise the product is
    /// appended with amount 1 after a stock check.
    pub async fn add_product(&self, product_id: ProductId) {
        let existing = self
            .state
            .borrow()
            .iter()
            .find(|item| item.id == product_id)
            .map(|item| item.amount);

        if let Some(amount) = existing {
            self.update_product_amount(UpdateProductAmount {
                product_id,
                amount: amount + 1,
            })
            .await;
            return;
        }

        if let Err(e) = self.try_add_new(product_id).await {
            match e {
                CartError::OutOfStock { .. } => self.notifier.notify(Notice::OutOfStock),
                e => {
                    tracing::error!(%product_id, error = %e, "Failed to add product to cart");
                    self.notifier.notify(Notice::AddFailed);
                }
            }
        }
    }

    /// Remove a product from the cart.
    ///
    /// Removing a product that is not in the cart emits a
    /// [`Notice::RemoveFailed`] and leaves the state untouched.
    pub fn remove_product(&self, product_id: ProductId) {
        if let Err(e) = self.try_remove(product_id) {
            if !matches!(e, CartError::NotInCart(_)) {
                tracing::error!(%product_id, error = %e, "Failed to remove product from cart");
            }
            self.notifier.notify(Notice::RemoveFailed);
        }
    }

    /// Set the quantity of a product in the cart.
    ///
    /// A requested amount of zero is a silent no-op. A requested amount
    /// above the available stock emits [`Notice::OutOfStock`] and leaves
    /// the state untouched.
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        let product_id = request.product_id;
        if let Err(e) = self.try_update(request).await {
            match e {
                CartError::OutOfStock { .. } => self.notifier.notify(Notice::OutOfStock),
                e => {
                    tracing::error!(%product_id, error = %e, "Failed to change product quantity");
                    self.notifier.notify(Notice::UpdateFailed);
                }
            }
        }
    }

    /// Reset the cart to empty, persisting the cleared mirror.
    pub fn clear(&self) {
        if let Err(e) = self.commit(Vec::new()) {
            tracing::error!(error = %e, "Failed to clear cart");
            self.notifier.notify(Notice::UpdateFailed);
        }
    }

    async fn try_add_new(&self, product_id: ProductId) -> Result<(), CartError> {
        let base = self.cart();

        let stock = self.catalog.stock(product_id).await?;
        if stock.amount < 1 {
            return Err(CartError::OutOfStock {
                product_id,
                requested: 1,
                available: stock.amount,
            });
        }

        let record = self.catalog.product(product_id).await?;
        let mut updated = base;
        updated.push(CartItem::from_record(record, 1));
        self.commit(updated)
    }

    fn try_remove(&self, product_id: ProductId) -> Result<(), CartError> {
        let base = self.cart();
        if !base.iter().any(|item| item.id == product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let updated: Vec<CartItem> = base
            .into_iter()
            .filter(|item| item.id != product_id)
            .collect();
        self.commit(updated)
    }

    async fn try_update(&self, request: UpdateProductAmount) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = request;
        if amount == 0 {
            return Ok(());
        }

        let base = self.cart();

        let stock = self.catalog.stock(product_id).await?;
        if stock.amount < amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        // Entries not matching the id pass through unchanged. A miss still
        // commits the (identical) list, mirroring the original behavior.
        let updated: Vec<CartItem> = base
            .into_iter()
            .map(|item| {
                if item.id == product_id {
                    CartItem { amount, ..item }
                } else {
                    item
                }
            })
            .collect();
        self.commit(updated)
    }

    /// Persist the new list, then publish it. On a persistence failure
    /// nothing is published and the prior state remains authoritative.
    fn commit(&self, updated: Vec<CartItem>) -> Result<(), CartError> {
        let encoded = serde_json::to_string(&updated)?;
        self.storage.set(&self.storage_key, &encoded)?;
        self.state.send_replace(updated);
        Ok(())
    }
}

/// Load the persisted mirror, treating an absent or malformed slot as an
/// empty cart.
fn load_mirror<S: CartStorage>(storage: &S, key: &str) -> Vec<CartItem> {
    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "Persisted cart is malformed, starting empty");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted cart, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_load_mirror_absent_slot_is_empty() {
        let storage = MemoryStorage::new();
        assert!(load_mirror(&storage, "@RocketShoes:cart").is_empty());
    }

    #[test]
    fn test_load_mirror_malformed_slot_is_empty() {
        let storage = MemoryStorage::new();
        storage.set("@RocketShoes:cart", "not json at all").unwrap();
        assert!(load_mirror(&storage, "@RocketShoes:cart").is_empty());
    }

    #[test]
    fn test_load_mirror_roundtrip() {
        let storage = MemoryStorage::new();
        storage
            .set(
                "@RocketShoes:cart",
                r#"[{"id":1,"name":"Shoe","price":100.0,"imageUrl":"img","amount":2}]"#,
            )
            .unwrap();
        let items = load_mirror(&storage, "@RocketShoes:cart");
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().amount, 2);
    }
}
