//! Catalog routes: read-only product and combo listings.

use axum::extract::{Path, State};
use axum::Json;

use matera_core::{Combo, Product};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/catalog/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.catalog.list_products().await?;
    Ok(Json(products))
}

/// GET /api/catalog/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .catalog
        .get_product(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;
    Ok(Json(product))
}

/// GET /api/catalog/combos
pub async fn list_combos(State(state): State<AppState>) -> Result<Json<Vec<Combo>>, ApiError> {
    let combos = state.catalog.list_combos().await?;
    Ok(Json(combos))
}
