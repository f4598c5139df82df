//! # Cart
//!
//! The shopping cart and its line items.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart                                                                   │
//! │  ├── items in insertion order (= display order)                        │
//! │  ├── at most one LineItem per product_id                               │
//! │  ├── every quantity >= 1 (dropping to 0 removes the line)              │
//! │  └── every unit_price >= € 0,00                                        │
//! │                                                                         │
//! │  Operation              Invalid request          Result                 │
//! │  ─────────              ───────────────          ──────                 │
//! │  add_item               quantity <= 0            no-op                  │
//! │  update_quantity        unknown product_id       no-op                  │
//! │  update_quantity        quantity <= 0            line removed           │
//! │  remove_item            unknown product_id       no-op                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is total. Mutations return the [`CartEvent`] they caused,
//! or `None` when the request left the cart untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Line Item
// =============================================================================

/// A single product-and-quantity entry in the cart.
///
/// Name, description, image and price are a snapshot of the catalog record
/// at the moment the product was added. Later catalog changes do not reach
/// lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub image_ref: Option<String>,
    pub unit_price: Money,
    pub quantity: u32,
}

impl LineItem {
    /// Snapshots a product into a new line.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            image_ref: product.image.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Event
// =============================================================================

/// What an effective mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CartEvent {
    /// A new line was appended.
    #[serde(rename_all = "camelCase")]
    ItemAdded { product_id: String, quantity: u32 },

    /// An existing line changed quantity.
    #[serde(rename_all = "camelCase")]
    QuantityChanged {
        product_id: String,
        from: u32,
        to: u32,
    },

    /// A line left the cart.
    #[serde(rename_all = "camelCase")]
    ItemRemoved { product_id: String },

    /// All lines were dropped.
    Cleared,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered list of [`LineItem`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,

    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds `quantity` units of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity grows by `quantity`
    /// - Product not in cart: a new line is appended
    /// - `quantity <= 0`: nothing happens
    /// - Negative catalog price: nothing happens
    ///
    /// Quantities saturate at `u32::MAX`.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> Option<CartEvent> {
        if quantity <= 0 || product.price.is_negative() {
            return None;
        }
        let quantity = saturate_quantity(quantity);

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let from = item.quantity;
            let to = from.saturating_add(quantity);
            if to == from {
                return None;
            }
            item.quantity = to;
            return Some(CartEvent::QuantityChanged {
                product_id: product.id.clone(),
                from,
                to,
            });
        }

        self.items.push(LineItem::from_product(product, quantity));
        Some(CartEvent::ItemAdded {
            product_id: product.id.clone(),
            quantity,
        })
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: the line is removed
    /// - Product not in cart: nothing happens
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Option<CartEvent> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        let item = self.items.iter_mut().find(|i| i.product_id == product_id)?;
        let from = item.quantity;
        let to = saturate_quantity(quantity);
        if to == from {
            return None;
        }
        item.quantity = to;

        Some(CartEvent::QuantityChanged {
            product_id: product_id.to_string(),
            from,
            to,
        })
    }

    /// Removes a line. Removing an absent product is a no-op.
    pub fn remove_item(&mut self, product_id: &str) -> Option<CartEvent> {
        let pos = self.items.iter().position(|i| i.product_id == product_id)?;
        self.items.remove(pos);

        Some(CartEvent::ItemRemoved {
            product_id: product_id.to_string(),
        })
    }

    /// Drops every line.
    pub fn clear(&mut self) -> Option<CartEvent> {
        if self.items.is_empty() {
            return None;
        }
        self.items.clear();
        self.created_at = Utc::now();
        Some(CartEvent::Cleared)
    }

    /// Sum of `unit_price × quantity` over all lines; zero when empty.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up the line for a product.
    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

fn saturate_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity).unwrap_or(u32::MAX)
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for the cart badge and checkout hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
    }

    #[test]
    fn test_add_item_appends_line() {
        let mut cart = Cart::new();
        let event = cart.add_item(&product("p1", 999), 2);

        assert_eq!(
            event,
            Some(CartEvent::ItemAdded {
                product_id: "p1".to_string(),
                quantity: 2
            })
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total(), Money::from_cents(1998));
    }

    #[test]
    fn test_add_same_product_merges_quantities() {
        let mut cart = Cart::new();
        let p1 = product("p1", 1000);

        cart.add_item(&p1, 2);
        let event = cart.add_item(&p1, 3);

        assert_eq!(
            event,
            Some(CartEvent::QuantityChanged {
                product_id: "p1".to_string(),
                from: 2,
                to: 5
            })
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").map(|i| i.quantity), Some(5));
        assert_eq!(cart.total(), Money::from_cents(5000));
    }

    #[test]
    fn test_repeated_adds_sum_quantities() {
        let mut cart = Cart::new();
        let p1 = product("p1", 250);
        let quantities = [1, 4, 2, 7, 1, 10];

        for q in quantities {
            cart.add_item(&p1, q);
        }

        let expected: i64 = quantities.iter().sum();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").map(|i| i64::from(i.quantity)), Some(expected));
    }

    #[test]
    fn test_add_non_positive_quantity_is_noop() {
        let mut cart = Cart::new();
        let p1 = product("p1", 1000);

        assert_eq!(cart.add_item(&p1, 0), None);
        assert_eq!(cart.add_item(&p1, -3), None);
        assert!(cart.is_empty());

        cart.add_item(&p1, 1);
        assert_eq!(cart.add_item(&p1, -1), None);
        assert_eq!(cart.get("p1").map(|i| i.quantity), Some(1));
    }

    #[test]
    fn test_add_negative_price_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&product("p1", -100), 1), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = Cart::new();
        let p1 = product("p1", 1);

        cart.add_item(&p1, i64::MAX);
        assert_eq!(cart.get("p1").map(|i| i.quantity), Some(u32::MAX));
        assert_eq!(cart.add_item(&p1, 1), None);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 1000), 2);

        let event = cart.update_quantity("p1", 7);
        assert!(matches!(event, Some(CartEvent::QuantityChanged { from: 2, to: 7, .. })));
        assert_eq!(cart.total(), Money::from_cents(7000));

        assert_eq!(cart.update_quantity("p1", 7), None);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 1000), 2);
        cart.add_item(&product("p2", 500), 1);
        let before = cart.len();

        let event = cart.update_quantity("p1", 0);

        assert_eq!(
            event,
            Some(CartEvent::ItemRemoved {
                product_id: "p1".to_string()
            })
        );
        assert_eq!(cart.len(), before - 1);
        assert!(cart.get("p1").is_none());
    }

    #[test]
    fn test_update_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 1000), 2);

        cart.update_quantity("p1", -4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 1000), 2);

        assert_eq!(cart.update_quantity("nope", 5), None);
        assert_eq!(cart.update_quantity("nope", 0), None);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 1000), 2);
        cart.add_item(&product("p2", 500), 1);

        let mut once = cart.clone();
        once.remove_item("p1");

        assert!(cart.remove_item("p1").is_some());
        assert!(cart.remove_item("p1").is_none());
        assert_eq!(cart.items(), once.items());
    }

    #[test]
    fn test_remove_from_empty_cart_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.remove_item("p1"), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut cart = Cart::new();
        cart.add_item(&product("b", 100), 1);
        cart.add_item(&product("a", 100), 1);
        cart.add_item(&product("c", 100), 1);
        cart.add_item(&product("a", 100), 1);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_line_snapshots_product_at_add_time() {
        let mut cart = Cart::new();
        let mut p1 = product("p1", 1000).with_description("Oud").with_image("/a.webp");
        cart.add_item(&p1, 1);

        p1.price = Money::from_cents(2000);
        p1.description = "Nieuw".to_string();
        cart.add_item(&p1, 1);

        let line = cart.get("p1").unwrap();
        assert_eq!(line.unit_price, Money::from_cents(1000));
        assert_eq!(line.description, "Oud");
        assert_eq!(line.image_ref.as_deref(), Some("/a.webp"));
        assert_eq!(cart.total(), Money::from_cents(2000));
    }

    #[test]
    fn test_total_matches_line_sum() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Money::zero());

        cart.add_item(&product("p1", 1295), 3);
        cart.add_item(&product("p2", 0), 4);
        cart.add_item(&product("p3", 49999), 1);
        cart.update_quantity("p1", 2);

        let expected: i64 = cart
            .items()
            .iter()
            .map(|i| i.unit_price.cents() * i64::from(i.quantity))
            .sum();
        assert_eq!(cart.total().cents(), expected);
        assert_eq!(cart.total().cents(), 1295 * 2 + 49999);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        assert_eq!(cart.clear(), None);

        cart.add_item(&product("p1", 999), 2);
        assert_eq!(cart.clear(), Some(CartEvent::Cleared));
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 1000), 2);
        cart.add_item(&product("p2", 250), 3);

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.total, Money::from_cents(2750));
    }

    #[test]
    fn test_quantity_invariant_holds_across_operations() {
        let mut cart = Cart::new();
        let ops: [(&str, i64, bool); 8] = [
            ("p1", 3, true),
            ("p2", 1, true),
            ("p1", -1, false),
            ("p2", 0, false),
            ("p3", 2, true),
            ("p1", 1, false),
            ("p3", -9, true),
            ("p4", 5, false),
        ];

        for (id, qty, is_add) in ops {
            if is_add {
                cart.add_item(&product(id, 100), qty);
            } else {
                cart.update_quantity(id, qty);
            }
            assert!(cart.items().iter().all(|i| i.quantity >= 1));

            let mut ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), cart.len());
        }
    }
}
