//! # Domain Types
//!
//! Core domain types used throughout the Matera storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Combo       │   │   LeadRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id (UUID)      │       │
//! │  │  price (Money)  │   │  price (Money)  │   │  channel        │       │
//! │  │  stock          │   │  product_ids    │   │  shipping       │       │
//! │  │  colors?        │   │  image_url      │   │  lines + totals │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ ShippingDetails │   │  OrderChannel   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  customer_name  │   │  Storefront     │                             │
//! │  │  phone, address │   │  Manual         │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog types are read models: the hosted backend owns them, this crate
//! only snapshots what it needs into cart lines and lead records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{CartLine, LineItem};
use crate::discount::DiscountInfo;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Stable catalog identifier (slug).
    pub id: String,

    /// Display name shown in the catalog and the cart.
    pub name: String,

    /// Current price. Frozen into cart lines at add time.
    pub price: Money,

    /// Units available.
    pub stock: i64,

    /// Catalog section ("yerbas", "mates", "bombillas", ...).
    pub category: String,

    /// Marketing description.
    pub description: String,

    /// Catalog image.
    pub image_url: String,

    /// Available color variants, if the product comes in colors.
    pub colors: Option<Vec<String>>,
}

impl Product {
    /// Checks if the product has any stock at all.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Checks if the requested quantity can be fulfilled from stock.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Builds the frozen cart-line snapshot for this product.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the catalog price changes
    /// later, cart lines keep the price the customer saw.
    pub fn line_item(&self, variant: Option<String>) -> LineItem {
        LineItem {
            item_id: self.id.clone(),
            variant,
            name: self.name.clone(),
            unit_price: self.price,
            image_url: Some(self.image_url.clone()),
        }
    }
}

// =============================================================================
// Combo
// =============================================================================

/// A curated bundle sold as a single item.
///
/// A combo has its own price (usually below the sum of its parts) and goes
/// into the cart as one line; the bundle contents are informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Combo {
    /// Stable catalog identifier (slug).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Bundle price.
    pub price: Money,

    /// Products included in the bundle.
    pub product_ids: Vec<String>,

    /// Marketing description.
    pub description: String,

    /// Catalog image.
    pub image_url: String,
}

impl Combo {
    /// Builds the frozen cart-line snapshot for this combo.
    ///
    /// Combos have no color variants; the line identity is the combo id.
    pub fn line_item(&self) -> LineItem {
        LineItem {
            item_id: self.id.clone(),
            variant: None,
            name: self.name.clone(),
            unit_price: self.price,
            image_url: Some(self.image_url.clone()),
        }
    }
}

// =============================================================================
// Shipping Details
// =============================================================================

/// Customer contact and delivery information collected at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShippingDetails {
    /// Customer full name.
    pub customer_name: String,

    /// Contact phone, used for the WhatsApp conversation.
    pub phone: String,

    /// Street address for delivery.
    pub address: String,

    /// City, optional for pickup orders.
    pub city: Option<String>,

    /// Free-form delivery notes.
    pub notes: Option<String>,
}

// =============================================================================
// Order Channel
// =============================================================================

/// Where an order record originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderChannel {
    /// Customer checkout through the storefront.
    Storefront,
    /// Sale recorded by hand from the admin console.
    Manual,
}

// =============================================================================
// Lead Record
// =============================================================================

/// The order record submitted to the lead sink at hand-off.
///
/// Uses the snapshot pattern end to end: lines and totals are frozen at
/// the moment of checkout, so the record stays meaningful even if the
/// catalog or the cart changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeadRecord {
    /// Unique identifier (UUID v4), assigned at submission time.
    pub id: String,

    /// Where this record came from.
    pub channel: OrderChannel,

    /// Customer contact and delivery information.
    pub shipping: ShippingDetails,

    /// Cart lines at checkout (frozen).
    pub lines: Vec<CartLine>,

    /// Subtotal at checkout (frozen).
    pub subtotal: Money,

    /// Applied discount, if a promotion code was active.
    pub discount: Option<DiscountInfo>,

    /// Payable total at checkout (frozen).
    pub total: Money,

    /// When the record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl LeadRecord {
    /// Total quantity across all lines, saturating at the `i64` limit.
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
