//! # Cart Commands
//!
//! Session commands that read or mutate the cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add ──► QuantityForm::parse_add ──► catalog lookup ──► Add            │
//! │  set ──► QuantityForm::parse_update ──────────────────► UpdateQuantity │
//! │  remove ──────────────────────────────────────────────► Remove         │
//! │  clear ───────────────────────────────────────────────► Clear          │
//! │  checkout ──► CheckoutConfirmation, then clear                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Form input is checked for well-formedness before anything touches the
//! cart; a rejected form leaves the cart as it was. Quantities of zero or
//! less are not rejected: the cart ignores them on add and drops the line on
//! update. The catalog lookup is awaited before the mutation, so the
//! mutation itself never suspends.
//!
//! Every command answers with the [`CartView`] after the change.

use etalage_core::validation::{form_input, QuantityForm};
use etalage_core::{CartAction, CartTotals, ProductCatalog};
use tracing::debug;

use crate::commands::product::find_product;
use crate::error::ApiError;
use crate::state::CartState;
use crate::view::{CartView, CheckoutConfirmation};

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartView {
    debug!("get_cart command");
    CartView::from(cart.cart())
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases
/// - Otherwise: appended as a new line with the product's current price
/// - `quantity` defaults to 1 and may not exceed 999
/// - Zero or less: the cart stays as it was
pub async fn add_to_cart<C: ProductCatalog>(
    catalog: &C,
    cart: &mut CartState,
    product_ref: &str,
    quantity: Option<&str>,
) -> Result<CartView, ApiError> {
    let quantity = quantity.unwrap_or("1");
    debug!(product_ref = %product_ref, quantity = %quantity, "add_to_cart command");

    let form = QuantityForm::parse_add(&form_input(&[
        ("productId", product_ref),
        ("quantity", quantity),
    ]))?;

    let product = find_product(catalog, &form.product_id)
        .await?
        .ok_or_else(|| ApiError::product_not_found(&form.product_id))?;

    cart.dispatch(CartAction::Add {
        product,
        quantity: form.quantity,
    });
    Ok(CartView::from(cart.cart()))
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Zero or less: removes the line
/// - Product not in the cart: nothing changes
pub fn update_cart_item(
    cart: &mut CartState,
    product_id: &str,
    quantity: &str,
) -> Result<CartView, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let form = QuantityForm::parse_update(&form_input(&[
        ("productId", product_id),
        ("quantity", quantity),
    ]))?;

    cart.dispatch(CartAction::UpdateQuantity {
        product_id: form.product_id,
        quantity: form.quantity,
    });
    Ok(CartView::from(cart.cart()))
}

/// Removes a line from the cart. Removing an absent line is a no-op.
pub fn remove_from_cart(cart: &mut CartState, product_id: &str) -> CartView {
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.dispatch(CartAction::Remove {
        product_id: product_id.trim().to_string(),
    });
    CartView::from(cart.cart())
}

/// Clears all lines from the cart.
pub fn clear_cart(cart: &mut CartState) -> CartView {
    debug!("clear_cart command");

    cart.dispatch(CartAction::Clear);
    CartView::from(cart.cart())
}

/// Submits checkout: shows the confirmation page and starts a new cart.
///
/// Payment and order persistence happen outside the storefront; only an
/// empty cart is refused.
pub fn checkout(cart: &mut CartState) -> Result<CheckoutConfirmation, ApiError> {
    debug!("checkout command");

    if cart.cart().is_empty() {
        return Err(ApiError::validation("Je winkelwagen is leeg"));
    }

    let totals = CartTotals::from(cart.cart());
    tracing::info!(
        items = totals.item_count,
        total = %totals.total,
        "Checkout submitted"
    );

    cart.dispatch(CartAction::Clear);
    Ok(CheckoutConfirmation)
}
