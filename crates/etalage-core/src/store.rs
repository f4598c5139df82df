//! # Cart Store
//!
//! The state container that owns the session's [`Cart`] and tells observers
//! about every change.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Shopper Action           CartAction              Cart Change           │
//! │  ──────────────           ──────────              ───────────           │
//! │                                                                         │
//! │  "In winkelwagen" ───────► Add ────────────────► push / qty += n       │
//! │                                                                         │
//! │  Change Quantity ────────► UpdateQuantity ─────► qty = n (0 removes)   │
//! │                                                                         │
//! │  Click Remove ───────────► Remove ─────────────► line dropped          │
//! │                                                                         │
//! │  Empty Cart ─────────────► Clear ──────────────► items.clear()         │
//! │                                                                         │
//! │  NOTE: the store is owned by exactly one session and mutated through   │
//! │        `&mut self`. There is no lock; nothing else can reach it.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Observers run synchronously, in subscription order, after each mutation
//! that changed the cart. A no-op request notifies nobody.

use std::fmt;

use crate::cart::{Cart, CartEvent};
use crate::money::Money;
use crate::types::Product;

/// A cart mutation expressed as data, as dispatched by the cart view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Add { product: Product, quantity: i64 },
    UpdateQuantity { product_id: String, quantity: i64 },
    Remove { product_id: String },
    Clear,
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&CartEvent, &Cart) + Send>;

/// Observable owner of the session cart.
///
/// ## Usage
/// ```rust
/// use etalage_core::{CartStore, Money, Product};
///
/// let mut store = CartStore::new();
/// store.subscribe(|event, cart| println!("{event:?} -> {}", cart.total()));
///
/// store.add_item(&Product::new("p1", "Fietsbel", Money::from_cents(1295)), 1);
/// ```
pub struct CartStore {
    cart: Cart,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        CartStore {
            cart: Cart::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Read-only snapshot of the current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Registers an observer called after every effective mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &Cart) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn add_item(&mut self, product: &Product, quantity: i64) -> Option<CartEvent> {
        let event = self.cart.add_item(product, quantity);
        self.notify(event)
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Option<CartEvent> {
        let event = self.cart.update_quantity(product_id, quantity);
        self.notify(event)
    }

    pub fn remove_item(&mut self, product_id: &str) -> Option<CartEvent> {
        let event = self.cart.remove_item(product_id);
        self.notify(event)
    }

    pub fn clear(&mut self) -> Option<CartEvent> {
        let event = self.cart.clear();
        self.notify(event)
    }

    /// Applies a [`CartAction`].
    pub fn dispatch(&mut self, action: CartAction) -> Option<CartEvent> {
        match action {
            CartAction::Add { product, quantity } => self.add_item(&product, quantity),
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.update_quantity(&product_id, quantity),
            CartAction::Remove { product_id } => self.remove_item(&product_id),
            CartAction::Clear => self.clear(),
        }
    }

    fn notify(&mut self, event: Option<CartEvent>) -> Option<CartEvent> {
        if let Some(ref e) = event {
            for (_, observer) in self.observers.iter_mut() {
                observer(e, &self.cart);
            }
        }
        event
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
    }

    fn recording_store() -> (CartStore, Arc<Mutex<Vec<CartEvent>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut store = CartStore::new();
        store.subscribe(move |event, _| sink.lock().unwrap().push(event.clone()));
        (store, seen)
    }

    #[test]
    fn test_adding_same_product_twice_merges() {
        let mut store = CartStore::new();
        let p1 = product("p1", 1000);

        store.add_item(&p1, 2);
        store.add_item(&p1, 3);

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().get("p1").map(|i| i.quantity), Some(5));
        assert_eq!(store.total(), Money::from_cents(5000));
    }

    #[test]
    fn test_observers_fire_once_per_effective_mutation() {
        let (mut store, seen) = recording_store();
        let p1 = product("p1", 1000);

        store.add_item(&p1, 1);
        store.add_item(&p1, 0);
        store.update_quantity("missing", 3);
        store.remove_item("missing");
        store.update_quantity("p1", 4);
        store.remove_item("p1");
        store.remove_item("p1");
        store.clear();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(matches!(seen[0], CartEvent::ItemAdded { .. }));
        assert!(matches!(seen[1], CartEvent::QuantityChanged { from: 1, to: 4, .. }));
        assert!(matches!(seen[2], CartEvent::ItemRemoved { .. }));
    }

    #[test]
    fn test_observer_sees_post_mutation_cart() {
        let totals = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&totals);
        let mut store = CartStore::new();
        store.subscribe(move |_, cart| sink.lock().unwrap().push(cart.total().cents()));

        store.add_item(&product("p1", 1000), 2);
        store.add_item(&product("p2", 250), 1);
        store.clear();

        assert_eq!(*totals.lock().unwrap(), vec![2000, 2250, 0]);
    }

    #[test]
    fn test_unsubscribe() {
        let (mut store, seen) = recording_store();
        let extra = store.subscribe(|_, _| {});

        assert!(store.unsubscribe(extra));
        assert!(!store.unsubscribe(extra));

        store.add_item(&product("p1", 100), 1);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_dispatch_actions() {
        let mut store = CartStore::new();

        store.dispatch(CartAction::Add {
            product: product("p1", 1000),
            quantity: 2,
        });
        store.dispatch(CartAction::Add {
            product: product("p2", 500),
            quantity: 1,
        });
        store.dispatch(CartAction::UpdateQuantity {
            product_id: "p2".to_string(),
            quantity: 0,
        });
        assert_eq!(store.cart().len(), 1);

        store.dispatch(CartAction::Remove {
            product_id: "p1".to_string(),
        });
        assert!(store.cart().is_empty());

        assert_eq!(store.dispatch(CartAction::Clear), None);
    }
}
