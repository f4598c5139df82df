//! # Domain Types
//!
//! The catalog record the storefront reads from the CMS.
//!
//! ## Ownership of Product Data
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CMS (system of record)          Storefront (read-only consumer)      │
//! │   ──────────────────────          ───────────────────────────────      │
//! │   Product { id, name, ... } ───►  ProductCatalog::get_by_id            │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                                   LineItem snapshot (cart)             │
//! │                                                                         │
//! │   The storefront never writes a product back.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product as published by the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque CMS identifier.
    pub id: String,

    /// Display name ("Stadsfiets Classic").
    pub name: String,

    /// Marketing copy shown on the product page and in the cart.
    pub description: String,

    /// Image reference (CMS asset URL or path).
    pub image: Option<String>,

    /// Price in euro cents.
    pub price: Money,

    /// URL slug used by the assortment pages.
    pub slug: String,

    /// Product type used to group the assortment ("fiets", "accessoire", ...).
    #[serde(rename = "type")]
    pub product_type: String,

    /// When the CMS last published this product.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with a slug derived from its name.
    ///
    /// Description, image and type start empty; set them with the builder
    /// methods below.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        let name = name.into();
        Product {
            id: id.into(),
            slug: slugify(&name),
            name,
            description: String::new(),
            image: None,
            price,
            product_type: String::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = product_type.into();
        self
    }

    /// What catalog search matches against: name, description and slug,
    /// one per line, lowercased with full Unicode case folding.
    ///
    /// Every [`ProductCatalog`](crate::ProductCatalog) searches this text, so
    /// a query finds the same products whichever catalog serves it.
    pub fn search_text(&self) -> String {
        format!("{}\n{}\n{}", self.name, self.description, self.slug).to_lowercase()
    }
}

/// Turns a display name into a URL slug.
///
/// Lowercases, folds the accented letters common in Dutch product names and
/// joins every other run of characters with a single `-`.
///
/// ```rust
/// use etalage_core::types::slugify;
///
/// assert_eq!(slugify("Crème Fietstas  (groot)"), "creme-fietstas-groot");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        let c = match c {
            'à' | 'á' | 'â' | 'ä' => 'a',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ò' | 'ó' | 'ô' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            other => other,
        };

        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_folds_unicode_case() {
        let product = Product::new("acc-777", "ÉLAN Fietsbel", Money::from_cents(1495))
            .with_description("Messing, Ø 55 mm");

        assert_eq!(product.search_text(), "élan fietsbel\nmessing, ø 55 mm\nelan-fietsbel");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Stadsfiets Classic"), "stadsfiets-classic");
        assert_eq!(slugify("  Bel -- Zilver "), "bel-zilver");
        assert_eq!(slugify("Café Racer"), "cafe-racer");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_product_builder() {
        let product = Product::new("p1", "Fietsbel Zilver", Money::from_cents(1295))
            .with_description("Heldere klank")
            .with_image("/images/bel.webp")
            .with_type("accessoire");

        assert_eq!(product.slug, "fietsbel-zilver");
        assert_eq!(product.image.as_deref(), Some("/images/bel.webp"));
        assert_eq!(product.product_type, "accessoire");
    }

    #[test]
    fn test_product_serializes_type_field() {
        let product = Product::new("p1", "Bel", Money::from_cents(500)).with_type("accessoire");
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["type"], "accessoire");
        assert_eq!(json["price"], 500);
        assert!(json.get("productType").is_none());
    }
}
