//! # Views
//!
//! Pure functions from state to what the shopper sees. Nothing in here
//! holds state or mutates the cart.
//!
//! - [`cart`] - Cart view model and its text rendering
//! - [`checkout`] - Checkout confirmation page
//! - [`product`] - Assortment listing and product detail

pub mod cart;
pub mod checkout;
pub mod product;

pub use cart::{CartLineView, CartView};
pub use checkout::CheckoutConfirmation;
pub use product::{ProductDetailView, ProductListView};
