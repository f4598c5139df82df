//! # etalage-core: Pure Storefront Logic for Etalage
//!
//! This crate is the **heart** of the Etalage storefront. It holds the cart
//! model, its store, the form validation schemas and the money type, all as
//! pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Etalage Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront session                           │   │
//! │  │    Assortiment ──► Winkelwagen ──► Afrekenen ──► Bevestiging    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartAction                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ etalage-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ cart/store│  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Schema   │  │   │
//! │  │   │           │  │  € 1,00   │  │ CartStore │  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ ProductCatalog                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 etalage-db (catalog store)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog product record
//! - [`money`] - Money type with integer euro cents and Dutch formatting
//! - [`cart`] - Cart and line items, with their invariants
//! - [`store`] - Observable cart store owned by one session
//! - [`catalog`] - Read-only product catalog trait and in-memory catalog
//! - [`validation`] - Declarative form validation schemas
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use etalage_core::{CartStore, Money, Product};
//!
//! let bel = Product::new("p1", "Fietsbel", Money::from_cents(1000));
//!
//! let mut store = CartStore::new();
//! store.add_item(&bel, 2);
//! store.add_item(&bel, 3);
//!
//! assert_eq!(store.cart().len(), 1);
//! assert_eq!(store.cart().total(), Money::from_cents(5000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEvent, CartTotals, LineItem};
pub use catalog::{InMemoryCatalog, ProductCatalog};
pub use error::{CoreError, CoreResult, FieldError, FieldErrors, ValidationError};
pub use money::Money;
pub use store::{CartAction, CartStore, SubscriptionId};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity a shopper can type into a quantity field.
///
/// The cart itself accepts any positive quantity; this bound only applies to
/// form input, where it catches typos like 1000 instead of 10.
pub const MAX_INPUT_QUANTITY: i64 = 999;

/// Default page size for assortment listings.
pub const DEFAULT_LIST_LIMIT: u32 = 24;
