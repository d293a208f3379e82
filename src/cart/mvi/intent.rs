//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents are what a view asks the store to do (add a product, bump a
/// quantity). They are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
