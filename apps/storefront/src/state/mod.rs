//! # Session State
//!
//! What one storefront session owns.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session                                                                │
//! │  ├── CartState          ← owns the CartStore (&mut, no locks)          │
//! │  │   └── badge: watch   ← latest CartTotals for the prompt             │
//! │  └── StorefrontCatalog  ← SQLite repository or demo assortment         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;

pub use cart::CartState;
pub use catalog::StorefrontCatalog;
