//! The cart store: in-memory source of truth mirrored into key-value storage.
//!
//! Every mutation runs the reducer, persists the resulting sequence, and only
//! then commits it to memory. The whole mutate-then-persist pair happens
//! under one lock, so the persisted blob is always the latest committed state.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cart::error::CartError;
use crate::cart::intent::{CartIntent, ZeroQuantity};
use crate::cart::item::{CartItem, NewCartItem};
use crate::cart::mvi::Reducer;
use crate::cart::reducer::CartReducer;
use crate::cart::state::CartState;
use crate::config::CartConfig;
use crate::storage::KeyValueStorage;

/// Storage key used by the storefront app.
pub const DEFAULT_STORAGE_KEY: &str = "@goMarket:products";

/// Thread-safe cart handle.
///
/// Cloning is cheap; all clones share the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    state: Mutex<CartState>,
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    on_zero: ZeroQuantity,
}

impl CartStore {
    /// Create a store and load whatever is persisted under `key`.
    ///
    /// # Errors
    /// Fails if storage cannot be read, or if the persisted blob is not a
    /// valid item sequence. There is no fallback to an empty cart.
    pub fn open(
        storage: Arc<dyn KeyValueStorage>,
        key: impl Into<String>,
        on_zero: ZeroQuantity,
    ) -> Result<Self, CartError> {
        let key = key.into();
        let items = match storage.get(&key)? {
            Some(blob) => serde_json::from_str::<Vec<CartItem>>(&blob).map_err(|e| {
                CartError::Corrupt {
                    key: key.clone(),
                    source: e,
                }
            })?,
            None => Vec::new(),
        };

        let state = CartReducer::reduce(CartState::default(), CartIntent::Load { items });
        if let Some(id) = state.duplicate_id() {
            return Err(CartError::DuplicateItem { id: id.to_string() });
        }

        tracing::info!(key = %key, items = state.items.len(), "Cart loaded");

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                state: Mutex::new(state),
                storage,
                key,
                on_zero,
            }),
        })
    }

    /// Open a store with the key and zero-quantity policy from config.
    pub fn from_config(
        config: &CartConfig,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Self, CartError> {
        Self::open(storage, config.storage.key.clone(), config.cart.on_zero)
    }

    /// Add a product. A product already in the cart is incremented instead.
    ///
    /// # Errors
    /// A non-finite price is rejected before anything is written.
    pub fn add_to_cart(&self, item: NewCartItem) -> Result<(), CartError> {
        if !item.price.is_finite() {
            return Err(CartError::InvalidPrice {
                id: item.id,
                price: item.price,
            });
        }
        let id = item.id.clone();
        self.apply(CartIntent::Add { item })?;
        tracing::debug!(id = %id, quantity = ?self.quantity_of(&id), "Added to cart");
        Ok(())
    }

    /// Bump the quantity of `id` by one. Unknown ids leave the cart unchanged.
    pub fn increment(&self, id: &str) -> Result<(), CartError> {
        self.apply(CartIntent::Increment { id: id.to_string() })?;
        tracing::debug!(id = %id, quantity = ?self.quantity_of(id), "Incremented");
        Ok(())
    }

    /// Lower the quantity of `id` by one, never below zero.
    ///
    /// What happens to a line at zero depends on the store's [`ZeroQuantity`]
    /// policy.
    pub fn decrement(&self, id: &str) -> Result<(), CartError> {
        self.apply(CartIntent::Decrement {
            id: id.to_string(),
            on_zero: self.inner.on_zero,
        })?;
        tracing::debug!(id = %id, quantity = ?self.quantity_of(id), "Decremented");
        Ok(())
    }

    pub fn remove(&self, id: &str) -> Result<(), CartError> {
        self.apply(CartIntent::Remove { id: id.to_string() })?;
        tracing::debug!(id = %id, "Removed from cart");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CartError> {
        self.apply(CartIntent::Clear)?;
        tracing::debug!("Cart cleared");
        Ok(())
    }

    /// Snapshot of the current items in insertion order.
    pub fn items(&self) -> Vec<CartItem> {
        self.inner.state.lock().items.clone()
    }

    /// Snapshot of the full state.
    pub fn state(&self) -> CartState {
        self.inner.state.lock().clone()
    }

    pub fn quantity_of(&self, id: &str) -> Option<u32> {
        self.inner.state.lock().find(id).map(|item| item.quantity)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.state.lock().contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.inner.state.lock().total_quantity()
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    pub fn on_zero(&self) -> ZeroQuantity {
        self.inner.on_zero
    }

    fn apply(&self, intent: CartIntent) -> Result<(), CartError> {
        let mut state = self.inner.state.lock();
        let next = CartReducer::reduce(state.clone(), intent);
        let blob = serde_json::to_string(&next.items).map_err(CartError::Encode)?;

        if let Err(e) = self.inner.storage.set(&self.inner.key, &blob) {
            tracing::warn!(key = %self.inner.key, error = %e, "Failed to persist cart");
            return Err(e.into());
        }

        *state = next;
        Ok(())
    }
}
