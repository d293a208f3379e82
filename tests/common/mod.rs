//! Shared test fixtures.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gomarket_cart::cart::{CartItem, CartStore, NewCartItem, ZeroQuantity, DEFAULT_STORAGE_KEY};
use gomarket_cart::storage::{KeyValueStorage, MemoryStorage, StorageError};

pub fn widget() -> NewCartItem {
    NewCartItem::new("p1", "Widget", "u", 9.99)
}

pub fn gadget() -> NewCartItem {
    NewCartItem::new("p2", "Gadget", "https://cdn.example.com/gadget.png", 24.5)
}

pub fn gizmo() -> NewCartItem {
    NewCartItem::new("p3", "Gizmo", "https://cdn.example.com/gizmo.png", 3.0)
}

pub fn line(item: NewCartItem, quantity: u32) -> CartItem {
    item.with_quantity(quantity)
}

/// Serialize items the way the store persists them.
pub fn blob(items: &[CartItem]) -> String {
    serde_json::to_string(items).unwrap()
}

/// Decode whatever is persisted under the default key.
pub fn persisted(storage: &dyn KeyValueStorage) -> Option<Vec<CartItem>> {
    storage
        .get(DEFAULT_STORAGE_KEY)
        .unwrap()
        .map(|blob| serde_json::from_str(&blob).unwrap())
}

/// Open a store over fresh in-memory storage seeded with `items`.
pub fn store_with(items: &[CartItem], on_zero: ZeroQuantity) -> (Arc<MemoryStorage>, CartStore) {
    let storage = Arc::new(if items.is_empty() {
        MemoryStorage::new()
    } else {
        MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, blob(items))
    });
    let store = CartStore::open(storage.clone(), DEFAULT_STORAGE_KEY, on_zero).unwrap();
    (storage, store)
}

/// Storage whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                message: "disk full".to_string(),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
