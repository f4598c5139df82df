//! # etalage-db: Catalog Storage for Etalage
//!
//! Local SQLite copy of the products the CMS publishes, read by the
//! storefront through [`etalage_core::ProductCatalog`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Etalage Data Flow                                │
//! │                                                                         │
//! │  Storefront command ("add fietsbel-zilver 2")                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     etalage-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (product.rs)  │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (default: <data dir>/etalage/catalog.db)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use etalage_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("catalog.db")).await?;
//! let bikes = db.products().list(Some("fiets"), 24).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::product::ProductRepository;
