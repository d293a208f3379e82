//! Shopping-cart state container.
//!
//! ```text
//! KeyValueStorage ──load──→ CartStore ──persist──→ KeyValueStorage
//!                              │  ↑
//!                  use_cart()  ↓  │ add / increment / decrement
//!                             views
//! ```

mod context;
mod error;
mod intent;
mod item;
pub mod mvi;
mod reducer;
mod state;
mod store;

pub use context::{use_cart, CartProvider, CartScope};
pub use error::CartError;
pub use intent::{CartIntent, ZeroQuantity};
pub use item::{CartItem, NewCartItem};
pub use reducer::CartReducer;
pub use state::CartState;
pub use store::{CartStore, DEFAULT_STORAGE_KEY};
