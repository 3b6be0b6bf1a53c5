//! Cart routes: the session cart with resolved totals.
//!
//! Every mutation returns the full cart so the drawer UI can re-render
//! from one payload. Totals always reflect the active wheel grant, so a
//! discount expiring between two requests shows up without any mutation.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use matera_core::{resolve_discount, CartLine, CartTotals};

use crate::error::ApiError;
use crate::services;
use crate::state::AppState;

/// The cart as the UI consumes it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,

    /// Derived totals, discount already clamped and applied.
    pub totals: CartTotals,

    /// Code of the applied discount, when one is active.
    pub discount_code: Option<String>,
}

/// Builds the response from the current session state.
fn cart_response(state: &AppState) -> CartResponse {
    let now = Utc::now();
    let cart = state.cart.snapshot();

    let grant = state.grants.active(now);
    let discount = resolve_discount(&cart, grant.as_ref(), now);

    CartResponse {
        totals: cart.totals(discount.as_ref()),
        discount_code: discount.map(|d| d.code),
        lines: cart.lines().to_vec(),
    }
}

/// GET /api/cart
pub async fn get_cart(State(state): State<AppState>) -> Json<CartResponse> {
    Json(cart_response(&state))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    /// Product or combo id.
    pub item_id: String,

    /// Variant, for products that have one.
    #[serde(default)]
    pub variant: Option<String>,

    /// Units to add.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// POST /api/cart
pub async fn add_item(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    services::add_to_cart(&state, &req.item_id, req.variant.as_deref(), req.quantity).await?;
    Ok(Json(cart_response(&state)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustQuantityRequest {
    /// Product or combo id.
    pub item_id: String,

    /// Variant the line was added with.
    #[serde(default)]
    pub variant: Option<String>,

    /// Signed change. The resulting quantity is floored at 1; removal is
    /// always an explicit DELETE, never a decrement.
    pub delta: i64,
}

/// PATCH /api/cart
pub async fn adjust_quantity(
    State(state): State<AppState>,
    Json(req): Json<AdjustQuantityRequest>,
) -> Json<CartResponse> {
    state
        .cart
        .adjust_quantity(&req.item_id, req.variant.as_deref(), req.delta);
    Json(cart_response(&state))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    /// Product or combo id.
    pub item_id: String,

    /// Variant the line was added with. Must match exactly; removing a
    /// line that is not present is a no-op.
    #[serde(default)]
    pub variant: Option<String>,
}

/// DELETE /api/cart
pub async fn remove_item(
    State(state): State<AppState>,
    Json(req): Json<RemoveItemRequest>,
) -> Json<CartResponse> {
    state.cart.remove_item(&req.item_id, req.variant.as_deref());
    Json(cart_response(&state))
}

/// POST /api/cart/clear
pub async fn clear_cart(State(state): State<AppState>) -> Json<CartResponse> {
    state.cart.clear();
    Json(cart_response(&state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use matera_core::{Money, PromotionGrant};

    #[tokio::test]
    async fn test_cart_response_resolves_active_grant() {
        let state = AppState::in_memory();
        services::add_to_cart(&state, "mate-imperial", None, 1)
            .await
            .unwrap();

        let grant = PromotionGrant::new("RULETA2000", Money::from_pesos(2_000), Utc::now());
        state.grants.save(&grant).unwrap();

        let response = cart_response(&state);

        assert_eq!(response.discount_code.as_deref(), Some("RULETA2000"));
        assert_eq!(response.totals.discount, Money::from_pesos(2_000));
        assert_eq!(response.totals.total, Money::from_pesos(43_000));
    }

    #[tokio::test]
    async fn test_cart_response_without_grant_has_no_discount() {
        let state = AppState::in_memory();
        services::add_to_cart(&state, "bombilla-chata", None, 2)
            .await
            .unwrap();

        let response = cart_response(&state);

        assert!(response.discount_code.is_none());
        assert_eq!(response.totals.discount, Money::zero());
        assert_eq!(response.totals.subtotal, response.totals.total);
        assert_eq!(response.lines.len(), 1);
    }
}
