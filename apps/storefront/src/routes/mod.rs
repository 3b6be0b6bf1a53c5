//! # HTTP Routes
//!
//! The storefront's JSON API.
//!
//! ```text
//! GET    /health                      liveness probe
//!
//! GET    /api/catalog/products        all products
//! GET    /api/catalog/products/:id    one product
//! GET    /api/catalog/combos          all combos
//!
//! GET    /api/cart                    cart with resolved totals
//! POST   /api/cart                    add item (merges lines)
//! PATCH  /api/cart                    adjust a line's quantity by a delta
//! DELETE /api/cart                    remove one line
//! POST   /api/cart/clear              empty the cart
//!
//! POST   /api/checkout                hand the cart off to WhatsApp
//!
//! POST   /api/wheel/spin              spin the promotional wheel
//! GET    /api/wheel/grant             currently active grant, if any
//!
//! POST   /api/assistant/ask           product Q&A
//!
//! GET    /api/admin/sales             recorded leads, oldest first
//! POST   /api/admin/sales             record a manual sale
//! ```
//!
//! Handlers decode, call the service layer, encode. CORS is permissive
//! because the storefront UI is served from a separate origin in
//! development; the API carries no credentials.

mod admin;
mod assistant;
mod cart;
mod catalog;
mod checkout;
mod wheel;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/catalog/products", get(catalog::list_products))
        .route("/api/catalog/products/:id", get(catalog::get_product))
        .route("/api/catalog/combos", get(catalog::list_combos))
        .route(
            "/api/cart",
            get(cart::get_cart)
                .post(cart::add_item)
                .patch(cart::adjust_quantity)
                .delete(cart::remove_item),
        )
        .route("/api/cart/clear", post(cart::clear_cart))
        .route("/api/checkout", post(checkout::checkout))
        .route("/api/wheel/spin", post(wheel::spin_wheel))
        .route("/api/wheel/grant", get(wheel::get_grant))
        .route("/api/assistant/ask", post(assistant::ask))
        .route(
            "/api/admin/sales",
            get(admin::list_sales).post(admin::record_sale),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}
