//! # Cart State
//!
//! The session's [`CartStore`] plus the observers the storefront hangs on it.
//!
//! ## Observers
//! ```text
//! CartStore mutation ──► CartEvent ──┬──► tracing (cart activity log)
//!                                    └──► watch::Sender<CartTotals> (badge)
//! ```
//!
//! The store is mutated only through `&mut CartState`. The badge channel is
//! the one piece other tasks may read.

use etalage_core::{Cart, CartAction, CartEvent, CartStore, CartTotals};
use tokio::sync::watch;
use tracing::info;

/// Cart owned by one storefront session.
#[derive(Debug)]
pub struct CartState {
    store: CartStore,
    badge: watch::Receiver<CartTotals>,
}

impl CartState {
    pub fn new() -> Self {
        let mut store = CartStore::new();

        store.subscribe(|event, cart| match event {
            CartEvent::ItemAdded {
                product_id,
                quantity,
            } => info!(%product_id, quantity, total = %cart.total(), "Item added to cart"),
            CartEvent::QuantityChanged {
                product_id,
                from,
                to,
            } => info!(%product_id, from, to, total = %cart.total(), "Cart quantity changed"),
            CartEvent::ItemRemoved { product_id } => {
                info!(%product_id, total = %cart.total(), "Item removed from cart")
            }
            CartEvent::Cleared => info!("Cart cleared"),
        });

        let (sender, badge) = watch::channel(CartTotals::from(store.cart()));
        store.subscribe(move |_, cart| {
            // send_replace: the badge keeps updating even with no receivers
            sender.send_replace(CartTotals::from(cart));
        });

        CartState { store, badge }
    }

    /// Read-only snapshot of the cart.
    pub fn cart(&self) -> &Cart {
        self.store.cart()
    }

    /// A receiver that always holds the latest cart totals.
    pub fn badge(&self) -> watch::Receiver<CartTotals> {
        self.badge.clone()
    }

    /// Applies a cart mutation. `None` means nothing changed.
    pub fn dispatch(&mut self, action: CartAction) -> Option<CartEvent> {
        self.store.dispatch(action)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
