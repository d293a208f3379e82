use serde::{Deserialize, Serialize};

use crate::cart::item::{CartItem, NewCartItem};
use crate::cart::mvi::Intent;

/// What happens to a line whose quantity is decremented to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroQuantity {
    /// Line stays in the cart with quantity 0.
    #[default]
    Keep,
    /// Line is dropped from the cart.
    Remove,
}

#[derive(Debug, Clone)]
pub enum CartIntent {
    /// Replace the whole sequence (initial load).
    Load { items: Vec<CartItem> },
    /// Append with quantity 1, or increment when the id is already present.
    Add { item: NewCartItem },
    Increment { id: String },
    /// Quantity never drops below zero.
    Decrement { id: String, on_zero: ZeroQuantity },
    Remove { id: String },
    Clear,
}

impl Intent for CartIntent {}
