//! Back-office routes: the lead log and manual sales.
//!
//! These sit on the same server as the storefront API because the shop is
//! one person with a laptop; there is no separate admin deployment. The
//! reverse proxy is expected to keep `/api/admin` off the public vhost.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::error;

use matera_core::{LeadRecord, ShippingDetails};

use crate::error::ApiError;
use crate::services::{self, ManualLine};
use crate::state::AppState;

/// GET /api/admin/sales
pub async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<LeadRecord>>, ApiError> {
    let leads = state.leads.list().await.map_err(|e| {
        error!("Could not read the lead log: {}", e);
        ApiError::internal("Lead log unavailable")
    })?;
    Ok(Json(leads))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualSaleRequest {
    /// Buyer name.
    pub customer_name: String,

    /// Contact phone.
    pub phone: String,

    /// Delivery address, or where the sale happened.
    pub address: String,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    /// What was sold.
    pub items: Vec<ManualLine>,
}

/// POST /api/admin/sales
pub async fn record_sale(
    State(state): State<AppState>,
    Json(req): Json<ManualSaleRequest>,
) -> Result<(StatusCode, Json<LeadRecord>), ApiError> {
    let shipping = ShippingDetails {
        customer_name: req.customer_name,
        phone: req.phone,
        address: req.address,
        city: req.city,
        notes: req.notes,
    };

    let lead = services::record_manual_sale(&state, shipping, req.items).await?;

    Ok((StatusCode::CREATED, Json(lead)))
}
