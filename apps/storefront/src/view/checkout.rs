//! # Checkout Confirmation
//!
//! The page shown after the shopper submits checkout. It is the same for
//! every order and does not read the cart.

use serde::Serialize;

/// Stateless acknowledgment page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckoutConfirmation;

impl CheckoutConfirmation {
    pub const TITLE: &'static str = "Bedankt voor je bestelling!";
    pub const BODY: &'static str =
        "We hebben je bestelling ontvangen. Je krijgt binnen enkele minuten een bevestiging per e-mail.";

    pub fn render(&self) -> String {
        format!("{}\n{}", Self::TITLE, Self::BODY)
    }
}
