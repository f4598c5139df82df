//! # Cart View
//!
//! View model of the cart with all money pre-formatted for display.
//!
//! ```text
//! Winkelwagen (3 artikelen)
//!   2 x Fietsbel Zilver                  € 7,95      € 15,90
//!   1 x Dubbele Fietstas                 € 64,50     € 64,50
//! Totaal: € 80,40
//! ```

use etalage_core::{Cart, LineItem};
use serde::Serialize;

const NAME_WIDTH: usize = 32;

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub quantity: u32,
    /// e.g. "€ 7,95"
    pub unit_price: String,
    /// e.g. "€ 15,90"
    pub line_total: String,
}

impl From<&LineItem> for CartLineView {
    fn from(item: &LineItem) -> Self {
        CartLineView {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            image: item.image_ref.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

/// The whole cart as the shopper sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: usize,
    pub total_quantity: u64,
    pub total: String,
    pub is_empty: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            lines: cart.items().iter().map(CartLineView::from).collect(),
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total: cart.total().to_string(),
            is_empty: cart.is_empty(),
        }
    }
}

impl CartView {
    /// Terminal rendering of the cart.
    pub fn render_text(&self) -> String {
        if self.is_empty {
            return "Je winkelwagen is leeg".to_string();
        }

        let mut out = format!(
            "Winkelwagen ({} {})\n",
            self.total_quantity,
            if self.total_quantity == 1 {
                "artikel"
            } else {
                "artikelen"
            }
        );

        for line in &self.lines {
            let name: String = line.name.chars().take(NAME_WIDTH).collect();
            out.push_str(&format!(
                "  {:>3} x {:<width$} {:>12} {:>12}\n",
                line.quantity,
                name,
                line.unit_price,
                line.line_total,
                width = NAME_WIDTH
            ));
        }

        out.push_str(&format!("Totaal: {}", self.total));
        out
    }
}
