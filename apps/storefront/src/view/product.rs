//! # Product Views
//!
//! Assortment listing and the product detail page.

use etalage_core::Product;
use serde::Serialize;

/// One row of an assortment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummaryView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub price: String,
}

impl From<&Product> for ProductSummaryView {
    fn from(product: &Product) -> Self {
        ProductSummaryView {
            id: product.id.clone(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            price: product.price.to_string(),
        }
    }
}

/// A page of products (listing or search results).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListView {
    pub heading: String,
    pub products: Vec<ProductSummaryView>,
}

impl ProductListView {
    pub fn new(heading: impl Into<String>, products: &[Product]) -> Self {
        ProductListView {
            heading: heading.into(),
            products: products.iter().map(ProductSummaryView::from).collect(),
        }
    }

    pub fn render_text(&self) -> String {
        if self.products.is_empty() {
            return format!("{}\n  Geen producten gevonden", self.heading);
        }

        let mut out = self.heading.clone();
        for p in &self.products {
            out.push_str(&format!("\n  {:<12} {:<32} {:>12}", p.id, p.name, p.price));
        }
        out
    }
}

/// The product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub price: String,
    pub product_type: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        ProductDetailView {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
            product_type: product.product_type.clone(),
        }
    }
}

impl ProductDetailView {
    pub fn render_text(&self) -> String {
        let mut out = format!("{} ({})\n{}", self.name, self.id, self.price);
        if !self.description.is_empty() {
            out.push('\n');
            out.push_str(&self.description);
        }
        if let Some(image) = &self.image {
            out.push_str(&format!("\nAfbeelding: {}", image));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etalage_core::Money;

    #[test]
    fn test_list_and_empty_list() {
        let bel = Product::new("acc-001", "Fietsbel Zilver", Money::from_cents(795));
        let view = ProductListView::new("Accessoires", &[bel]);
        assert!(view.render_text().contains("€ 7,95"));

        let empty = ProductListView::new("Zoekresultaten", &[]);
        assert!(empty.render_text().ends_with("Geen producten gevonden"));
    }

    #[test]
    fn test_detail() {
        let bel = Product::new("acc-001", "Fietsbel Zilver", Money::from_cents(795))
            .with_description("Klassieke bel met heldere klank.");
        let text = ProductDetailView::from(&bel).render_text();

        assert!(text.starts_with("Fietsbel Zilver (acc-001)"));
        assert!(text.contains("heldere klank"));
        assert!(!text.contains("Afbeelding"));
    }
}
