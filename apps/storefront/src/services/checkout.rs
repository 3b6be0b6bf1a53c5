//! Checkout: turning the session cart into a WhatsApp hand-off.
//!
//! ## Hand-off Sequence
//! ```text
//! validate shipping ──► snapshot cart ──► resolve discount
//!        │                                      │
//!        ▼                                      ▼
//!  reject empty cart                     build LeadRecord
//!                                               │
//!                              ┌────────────────┴───────────────┐
//!                              ▼                                ▼
//!                     record lead (best effort,         build wa.me link
//!                      bounded retries, advisory)      (this one must work)
//! ```
//!
//! The two side effects are independent: a dead lead log never stops the
//! customer from reaching the shop on WhatsApp. The link is the product;
//! the record is bookkeeping.

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, error, info, warn};
use url::Url;
use uuid::Uuid;

use matera_core::{
    resolve_discount, validate_shipping, Cart, CoreError, LeadRecord, OrderChannel,
    ShippingDetails,
};

use crate::error::ApiError;
use crate::services::resolve_line_item;
use crate::state::AppState;
use crate::whatsapp;

/// How many times a lead submit is retried before giving up.
const LEAD_SUBMIT_ATTEMPTS: u32 = 3;

/// Result of a storefront checkout.
#[derive(Debug)]
pub struct PlacedOrder {
    /// The order as handed off, totals resolved.
    pub lead: LeadRecord,

    /// Whether the lead log accepted the record.
    pub recorded: bool,

    /// Pre-filled conversation link for the customer.
    pub whatsapp_url: Url,
}

/// One line of a back-office manual sale.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualLine {
    /// Product or combo id.
    pub item_id: String,

    /// Variant, for products that have one.
    #[serde(default)]
    pub variant: Option<String>,

    /// Units sold.
    pub quantity: i64,
}

/// Hands the session cart off to WhatsApp.
///
/// Fails only on things the customer can fix (bad shipping details, an
/// empty cart) or on a broken deployment. A failing lead log is retried,
/// logged, and reported in [`PlacedOrder::recorded`], never surfaced.
pub async fn place_order(
    state: &AppState,
    shipping: ShippingDetails,
) -> Result<PlacedOrder, ApiError> {
    validate_shipping(&shipping)?;

    let now = Utc::now();
    let cart = state.cart.snapshot();
    if cart.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let grant = state.grants.active(now);
    let discount = resolve_discount(&cart, grant.as_ref(), now);

    let lead = LeadRecord {
        id: Uuid::new_v4().to_string(),
        channel: OrderChannel::Storefront,
        shipping,
        lines: cart.lines().to_vec(),
        subtotal: cart.subtotal(),
        discount: discount.clone(),
        total: cart.total(discount.as_ref()),
        created_at: now,
    };

    let recorded = submit_lead(state, &lead).await;

    let message = whatsapp::order_message(&state.config.store.name, &lead);
    let whatsapp_url =
        whatsapp::order_link(&state.config.store.whatsapp_number, &message).map_err(|e| {
            error!("Could not build WhatsApp link: {}", e);
            ApiError::internal("Could not build the WhatsApp link")
        })?;

    if state.config.policies.clear_cart_after_handoff {
        debug!("Clearing cart after hand-off per policy");
        state.cart.clear();
    }

    info!(
        lead_id = %lead.id,
        items = lead.item_count(),
        total = %lead.total,
        recorded,
        "Order handed off to WhatsApp"
    );

    Ok(PlacedOrder {
        lead,
        recorded,
        whatsapp_url,
    })
}

/// Records a sale closed outside the storefront (at a feria, over the
/// phone). No session cart and no discount; the shop already settled the
/// price. Here the record IS the point, so a failing sink is an error.
pub async fn record_manual_sale(
    state: &AppState,
    shipping: ShippingDetails,
    items: Vec<ManualLine>,
) -> Result<LeadRecord, ApiError> {
    validate_shipping(&shipping)?;

    if items.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let now = Utc::now();
    let mut cart = Cart::new();
    for item in &items {
        let line = resolve_line_item(state, &item.item_id, item.variant.as_deref()).await?;
        cart.add_line(line, item.quantity, now)?;
    }

    let lead = LeadRecord {
        id: Uuid::new_v4().to_string(),
        channel: OrderChannel::Manual,
        shipping,
        lines: cart.lines().to_vec(),
        subtotal: cart.subtotal(),
        discount: None,
        total: cart.total(None),
        created_at: now,
    };

    state.leads.submit(&lead).await?;

    info!(lead_id = %lead.id, total = %lead.total, "Manual sale recorded");

    Ok(lead)
}

/// Bounded best-effort submit. Returns whether any attempt succeeded.
async fn submit_lead(state: &AppState, lead: &LeadRecord) -> bool {
    for attempt in 1..=LEAD_SUBMIT_ATTEMPTS {
        match state.leads.submit(lead).await {
            Ok(()) => return true,
            Err(e) => {
                warn!(lead_id = %lead.id, attempt, "Lead submit failed: {}", e);
            }
        }
    }
    false
}
