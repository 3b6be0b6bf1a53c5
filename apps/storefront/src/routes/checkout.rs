//! Checkout route: shipping details in, WhatsApp link out.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use matera_core::{DiscountInfo, Money, ShippingDetails};

use crate::error::ApiError;
use crate::services;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Who receives the order.
    pub customer_name: String,

    /// Contact phone, as typed.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City, optional for CABA pickups.
    #[serde(default)]
    pub city: Option<String>,

    /// Free-form delivery notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckoutRequest {
    fn into_shipping(self) -> ShippingDetails {
        ShippingDetails {
            customer_name: self.customer_name,
            phone: self.phone,
            address: self.address,
            city: self.city,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Id of the recorded lead.
    pub lead_id: String,

    /// Deep link that opens the pre-filled conversation.
    pub whatsapp_url: String,

    /// Cart subtotal at hand-off.
    pub subtotal: Money,

    /// Applied discount, if a grant was active.
    pub discount: Option<DiscountInfo>,

    /// Amount the customer will confirm on WhatsApp.
    pub total: Money,

    /// Whether the lead log accepted the record. Informational; the link
    /// is valid either way.
    pub recorded: bool,
}

/// POST /api/checkout
pub async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let placed = services::place_order(&state, req.into_shipping()).await?;

    Ok(Json(CheckoutResponse {
        lead_id: placed.lead.id,
        whatsapp_url: placed.whatsapp_url.to_string(),
        subtotal: placed.lead.subtotal,
        discount: placed.lead.discount,
        total: placed.lead.total,
        recorded: placed.recorded,
    }))
}
