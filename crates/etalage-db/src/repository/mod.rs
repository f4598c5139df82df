//! # Repository Module
//!
//! Database repositories for the catalog.
//!
//! - [`ProductRepository`](product::ProductRepository) - Product lookups,
//!   assortment listing and search

pub mod product;
