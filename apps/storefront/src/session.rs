//! # Storefront Session
//!
//! One shopper, one cart, one command per input line.
//!
//! ## Session Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  prompt "[3] > "  (item count from the cart badge)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read line ──► Command::from_str ──► execute ──► render text           │
//! │       ▲                                               │                 │
//! │       └───────────────────────────────────────────────┘                 │
//! │                                                                         │
//! │  Ends on `quit` or end of input.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use etalage_core::ProductCatalog;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::commands::{self, Command, HELP_TEXT};
use crate::error::ApiError;
use crate::state::CartState;
use crate::view::{ProductDetailView, ProductListView};

/// What to do after a line was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit(String),
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Continue(text) | Outcome::Quit(text) => text,
        }
    }
}

/// A storefront session over any product catalog.
#[derive(Debug)]
pub struct Session<C> {
    catalog: C,
    cart: CartState,
    list_limit: u32,
}

impl<C: ProductCatalog> Session<C> {
    pub fn new(catalog: C, list_limit: u32) -> Self {
        Session {
            catalog,
            cart: CartState::new(),
            list_limit,
        }
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Prompt showing the number of articles in the cart.
    pub fn prompt(&self) -> String {
        let totals = *self.cart.badge().borrow();
        format!("[{}] > ", totals.total_quantity)
    }

    /// Handles one line of input. Errors are rendered, never returned.
    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        let result = match line.parse::<Command>() {
            Ok(command) => self.execute(command).await,
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            debug!(code = ?e.code, message = %e.message, "Command failed");
            Outcome::Continue(e.render_text())
        })
    }

    async fn execute(&mut self, command: Command) -> Result<Outcome, ApiError> {
        let text = match command {
            Command::Help => HELP_TEXT.to_string(),

            Command::List { product_type } => {
                let products = commands::product::list_products(
                    &self.catalog,
                    product_type.as_deref(),
                    self.list_limit,
                )
                .await?;
                let heading = match &product_type {
                    Some(t) => format!("Assortiment: {}", t),
                    None => "Assortiment".to_string(),
                };
                ProductListView::new(heading, &products).render_text()
            }

            Command::Search { query } => {
                let products =
                    commands::product::search_products(&self.catalog, &query, self.list_limit)
                        .await?;
                ProductListView::new(format!("Zoekresultaten voor '{}'", query.trim()), &products)
                    .render_text()
            }

            Command::Show { reference } => {
                let product = commands::product::get_product(&self.catalog, &reference).await?;
                ProductDetailView::from(&product).render_text()
            }

            Command::Add {
                reference,
                quantity,
            } => commands::cart::add_to_cart(
                &self.catalog,
                &mut self.cart,
                &reference,
                quantity.as_deref(),
            )
            .await?
            .render_text(),

            Command::Set {
                product_id,
                quantity,
            } => commands::cart::update_cart_item(&mut self.cart, &product_id, &quantity)?
                .render_text(),

            Command::Remove { product_id } => {
                commands::cart::remove_from_cart(&mut self.cart, &product_id).render_text()
            }

            Command::Cart => commands::cart::get_cart(&self.cart).render_text(),

            Command::Clear => commands::cart::clear_cart(&mut self.cart).render_text(),

            Command::Checkout => commands::cart::checkout(&mut self.cart)?.render(),

            Command::Quit => return Ok(Outcome::Quit("Tot ziens!".to_string())),
        };

        Ok(Outcome::Continue(text))
    }

    /// Runs the session until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Session started");
        output
            .write_all(b"Welkom bij Etalage. Typ 'help' voor een overzicht.\n")
            .await?;

        let mut lines = input.lines();
        loop {
            output.write_all(self.prompt().as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let outcome = self.handle_line(&line).await;
            output.write_all(outcome.text().as_bytes()).await?;
            output.write_all(b"\n").await?;

            if matches!(outcome, Outcome::Quit(_)) {
                break;
            }
        }

        output.flush().await?;
        info!(
            items = self.cart.cart().len(),
            "Session ended"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use etalage_core::{InMemoryCatalog, Money};

    fn session() -> Session<InMemoryCatalog> {
        Session::new(InMemoryCatalog::demo(), 24)
    }

    #[tokio::test]
    async fn test_add_then_view_cart() {
        let mut s = session();

        let out = s.handle_line("add acc-001 2").await;
        assert!(out.text().contains("Fietsbel Zilver"));
        assert!(out.text().ends_with("Totaal: € 15,90"));

        let out = s.handle_line("bestel fietsbel-zilver").await;
        assert!(out.text().starts_with("Winkelwagen (3 artikelen)"));
        assert_eq!(s.cart().cart().total(), Money::from_cents(3 * 795));
        assert_eq!(s.prompt(), "[3] > ");
    }

    #[tokio::test]
    async fn test_rejected_quantity_reports_field() {
        let mut s = session();

        let out = s.handle_line("add acc-001 1000").await;
        assert!(out.text().contains("quantity: Aantal mag maximaal 999 zijn"));
        assert!(s.cart().cart().is_empty());
    }

    #[tokio::test]
    async fn test_add_zero_changes_nothing() {
        let mut s = session();

        let out = s.handle_line("add acc-001 0").await;
        assert_eq!(out, Outcome::Continue("Je winkelwagen is leeg".to_string()));
        assert!(s.cart().cart().is_empty());
    }

    #[tokio::test]
    async fn test_set_negative_removes_line() {
        let mut s = session();
        s.handle_line("add acc-001").await;

        let out = s.handle_line("set acc-001 -1").await;
        assert_eq!(out, Outcome::Continue("Je winkelwagen is leeg".to_string()));
        assert_eq!(s.cart().cart().len(), 0);
        assert_eq!(s.prompt(), "[0] > ");
    }

    #[tokio::test]
    async fn test_set_zero_removes_line() {
        let mut s = session();
        s.handle_line("add acc-001").await;
        s.handle_line("add acc-002").await;

        let out = s.handle_line("set acc-001 0").await;
        assert!(!out.text().contains("Fietsbel"));
        assert_eq!(s.cart().cart().len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_flow() {
        let mut s = session();

        let out = s.handle_line("checkout").await;
        assert_eq!(out, Outcome::Continue("Je winkelwagen is leeg".to_string()));

        s.handle_line("add fiets-001").await;
        let out = s.handle_line("afrekenen").await;
        assert!(out.text().starts_with("Bedankt voor je bestelling!"));
        assert!(s.cart().cart().is_empty());
    }

    #[tokio::test]
    async fn test_run_reads_until_quit() {
        let mut s = session();
        let input: &[u8] = b"list accessoire\n\nadd acc-003\nquit\nadd acc-001\n";
        let mut output = Vec::new();

        s.run(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Assortiment: accessoire"));
        assert!(text.contains("Ringslot ART 2"));
        assert!(text.contains("Tot ziens!"));
        // input after quit is not read
        assert!(s.cart().cart().get("acc-001").is_none());
        assert_eq!(s.cart().cart().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let mut s = session();
        let out = s.handle_line("koop alles").await;
        assert!(out.text().starts_with("Onbekende opdracht: koop"));
    }
}
