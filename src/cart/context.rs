//! Provider/consumer scoping for the cart.
//!
//! A view tree mounts a [`CartProvider`] once; anything running inside that
//! scope on the same thread reaches the store through [`use_cart`]. Scopes
//! nest, and the innermost one wins.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

use crate::cart::error::CartError;
use crate::cart::store::CartStore;

thread_local! {
    static SCOPES: RefCell<Vec<(u64, CartStore)>> = const { RefCell::new(Vec::new()) };
    static NEXT_SCOPE_ID: Cell<u64> = const { Cell::new(0) };
}

pub struct CartProvider;

impl CartProvider {
    /// Make `store` available to [`use_cart`] until the returned guard drops.
    pub fn mount(store: CartStore) -> CartScope {
        let id = NEXT_SCOPE_ID.with(|next| {
            let id = next.get();
            next.set(id.wrapping_add(1));
            id
        });
        SCOPES.with(|scopes| scopes.borrow_mut().push((id, store)));
        tracing::trace!(scope = id, "Cart provider mounted");
        CartScope {
            id,
            _not_send: PhantomData,
        }
    }

    /// Run `f` with `store` mounted.
    pub fn scope<R>(store: CartStore, f: impl FnOnce() -> R) -> R {
        let _scope = Self::mount(store);
        f()
    }
}

/// Guard for a mounted provider. Unmounts on drop.
///
/// Not `Send`: a scope belongs to the thread that mounted it.
#[must_use = "the provider is unmounted as soon as the scope is dropped"]
pub struct CartScope {
    id: u64,
    _not_send: PhantomData<*const ()>,
}

impl Drop for CartScope {
    fn drop(&mut self) {
        let id = self.id;
        SCOPES.with(|scopes| scopes.borrow_mut().retain(|(scope, _)| *scope != id));
        tracing::trace!(scope = id, "Cart provider unmounted");
    }
}

/// Resolve the store of the innermost mounted provider.
///
/// # Errors
/// Returns [`CartError::NoProvider`] when called outside every provider scope.
pub fn use_cart() -> Result<CartStore, CartError> {
    SCOPES
        .with(|scopes| scopes.borrow().last().map(|(_, store)| store.clone()))
        .ok_or(CartError::NoProvider)
}
