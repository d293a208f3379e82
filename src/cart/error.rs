use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the cart store and its context accessor.
#[derive(Debug, Error)]
pub enum CartError {
    /// `use_cart` was called with no mounted provider. This is a wiring
    /// defect in the caller, not a transient condition.
    #[error("use_cart must be used within a CartProvider")]
    NoProvider,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Persisted cart under '{key}' is malformed: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),

    /// NaN and infinities cannot be persisted as JSON numbers.
    #[error("Product '{id}' has a non-finite price: {price}")]
    InvalidPrice { id: String, price: f64 },

    #[error("Persisted cart contains product '{id}' more than once")]
    DuplicateItem { id: String },
}
