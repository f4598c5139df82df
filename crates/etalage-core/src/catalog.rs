//! # Product Catalog
//!
//! The read-only interface the storefront uses to fetch products from the
//! CMS, plus an in-memory implementation holding the demo assortment.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ProductCatalog                                  │
//! │                               │                                         │
//! │            ┌──────────────────┴──────────────────┐                      │
//! │            ▼                                     ▼                      │
//! │   InMemoryCatalog (this file)          ProductRepository (etalage-db)   │
//! │   tests, demo assortment               SQLite catalog store            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No method takes `&mut self`: the catalog is never written through this
//! trait.

use std::future::Future;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::Product;

/// Read-only access to published products.
pub trait ProductCatalog {
    /// Fetches a product by its CMS id.
    fn get_by_id(&self, id: &str) -> impl Future<Output = CoreResult<Option<Product>>> + Send;

    /// Fetches a product by its URL slug.
    fn get_by_slug(&self, slug: &str)
        -> impl Future<Output = CoreResult<Option<Product>>> + Send;

    /// Lists products, optionally restricted to one product type.
    fn list(
        &self,
        product_type: Option<&str>,
        limit: u32,
    ) -> impl Future<Output = CoreResult<Vec<Product>>> + Send;

    /// Finds products whose name, description or slug contains `query`.
    fn search(&self, query: &str, limit: u32)
        -> impl Future<Output = CoreResult<Vec<Product>>> + Send;
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// A catalog held in memory, in publication order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        InMemoryCatalog { products }
    }

    /// The demo assortment shown when no catalog database is configured.
    pub fn demo() -> Self {
        InMemoryCatalog::new(demo_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryCatalog {
    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> CoreResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list(&self, product_type: Option<&str>, limit: u32) -> CoreResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|p| product_type.map_or(true, |t| p.product_type == t))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str, limit: u32) -> CoreResult<Vec<Product>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.list(None, limit).await;
        }

        Ok(self
            .products
            .iter()
            .filter(|p| p.search_text().contains(&query))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// The storefront's demo assortment.
///
/// Also what the `seed` tool writes into a fresh catalog database.
pub fn demo_products() -> Vec<Product> {
    vec![
        Product::new("fiets-001", "Stadsfiets Classic", Money::from_cents(54900))
            .with_description("Comfortabele stadsfiets met 3 versnellingen en terugtraprem.")
            .with_image("/images/producten/stadsfiets-classic.webp")
            .with_type("fiets"),
        Product::new("fiets-002", "E-bike Voyager", Money::from_cents(229900))
            .with_description("Elektrische fiets met middenmotor en 500 Wh accu.")
            .with_image("/images/producten/e-bike-voyager.webp")
            .with_type("fiets"),
        Product::new("fiets-003", "Kinderfiets 20 inch", Money::from_cents(27995))
            .with_description("Stevige kinderfiets voor 6 tot 9 jaar.")
            .with_image("/images/producten/kinderfiets-20.webp")
            .with_type("fiets"),
        Product::new("acc-001", "Fietsbel Zilver", Money::from_cents(795))
            .with_description("Klassieke bel met heldere klank.")
            .with_image("/images/producten/fietsbel-zilver.webp")
            .with_type("accessoire"),
        Product::new("acc-002", "Dubbele Fietstas", Money::from_cents(6450))
            .with_description("Waterdichte dubbele tas, 2 x 16 liter.")
            .with_image("/images/producten/dubbele-fietstas.webp")
            .with_type("accessoire"),
        Product::new("acc-003", "Ringslot ART 2", Money::from_cents(3999))
            .with_description("Goedgekeurd ringslot met insteekketting.")
            .with_image("/images/producten/ringslot-art2.webp")
            .with_type("accessoire"),
        Product::new("ond-001", "Binnenband 28 inch", Money::from_cents(899))
            .with_description("Binnenband met hollandventiel.")
            .with_type("onderdeel"),
        Product::new("ond-002", "LED Verlichtingsset", Money::from_cents(2495))
            .with_description("Voor- en achterlicht op batterijen, USB-oplaadbaar.")
            .with_image("/images/producten/led-verlichtingsset.webp")
            .with_type("onderdeel"),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================
