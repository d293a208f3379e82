//! Shopping-cart state container for the goMarket storefront.
//!
//! The cart lives in memory as an ordered list of line items, is mirrored to
//! a key-value store after every change, and is handed to views through a
//! provider scope (`CartProvider::mount` / `use_cart`).

pub mod cart;
pub mod config;
pub mod logging;
pub mod storage;
