//! Item resolution: turning a catalog id into a cart line.
//!
//! The cart only stores frozen [`LineItem`] snapshots, so the price a line
//! carries is always the catalog price at the moment it was added. Both the
//! storefront add-to-cart route and the back-office manual sale go through
//! the same resolution.

use tracing::debug;

use matera_core::{CoreError, LineItem};

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves `item_id` to a line snapshot.
///
/// Products carry the chosen variant; combos have no variants, so a variant
/// sent with a combo id is ignored. Unknown ids are a not-found error.
pub async fn resolve_line_item(
    state: &AppState,
    item_id: &str,
    variant: Option<&str>,
) -> Result<LineItem, ApiError> {
    if let Some(product) = state.catalog.get_product(item_id).await? {
        return Ok(product.line_item(variant.map(|v| v.to_string())));
    }

    if let Some(combo) = state.catalog.get_combo(item_id).await? {
        return Ok(combo.line_item());
    }

    Err(ApiError::not_found("Item", item_id))
}

/// Adds an item to the session cart.
///
/// When the `enforce_stock_on_add` policy is on, the quantity already in the
/// cart plus the requested quantity must fit the product's counted stock.
/// Combos are never stock-checked; their parts are settled by hand.
pub async fn add_to_cart(
    state: &AppState,
    item_id: &str,
    variant: Option<&str>,
    quantity: i64,
) -> Result<(), ApiError> {
    debug!(item_id, ?variant, quantity, "Adding item to cart");

    if let Some(product) = state.catalog.get_product(item_id).await? {
        if state.config.policies.enforce_stock_on_add {
            let already = state
                .cart
                .with_cart(|cart| cart.line(item_id, variant).map(|l| l.quantity).unwrap_or(0));
            let requested = already.saturating_add(quantity);
            if !product.can_fulfill(requested) {
                return Err(CoreError::InsufficientStock {
                    item_id: item_id.to_string(),
                    available: product.stock,
                    requested,
                }
                .into());
            }
        }

        let line = product.line_item(variant.map(|v| v.to_string()));
        state.cart.add_item(line, quantity)?;
        return Ok(());
    }

    if let Some(combo) = state.catalog.get_combo(item_id).await? {
        state.cart.add_item(combo.line_item(), quantity)?;
        return Ok(());
    }

    Err(ApiError::not_found("Item", item_id))
}
