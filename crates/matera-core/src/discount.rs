//! # Discount Module
//!
//! Promotion grants and discount resolution.
//!
//! ## How Discounts Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Discount Resolution                                │
//! │                                                                         │
//! │  Lucky Wheel ──► PromotionGrant ──► session store (matera-session)      │
//! │                   code, amount,                                         │
//! │                   granted_at,                                           │
//! │                   expires_at (+15 min)                                  │
//! │                                                                         │
//! │  Checkout / cart view:                                                  │
//! │                                                                         │
//! │    resolve_discount(cart, grant, now) ─┬─► None     (no/expired grant)  │
//! │                                        │                                │
//! │                                        └─► Some(DiscountInfo)           │
//! │                                             amount = min(grant,         │
//! │                                                          subtotal)      │
//! │                                                                         │
//! │  An expired grant is indistinguishable from no grant: the resolver      │
//! │  never surfaces stale discounts.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is a pure function: it reads the cart, never mutates it, and
//! takes `now` as an argument instead of reading the clock.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::GRANT_VALIDITY_MINUTES;

// =============================================================================
// Discount Info
// =============================================================================

/// A resolved, applicable discount.
///
/// `amount` is absolute and already clamped to the cart subtotal, so
/// callers can subtract it without further checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountInfo {
    /// The promotion code this discount came from.
    pub code: String,

    /// Absolute discount amount, `<=` the subtotal it was resolved against.
    pub amount: Money,
}

// =============================================================================
// Promotion Grant
// =============================================================================

/// A time-boxed discount grant won on the promotional wheel.
///
/// ## Lifecycle
/// Written into the session store when the wheel lands on a discount
/// wedge; read back by [`resolve_discount`] until it expires. The validity
/// window is [`GRANT_VALIDITY_MINUTES`] from the moment of the grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromotionGrant {
    /// The promotion code shown to the customer.
    pub code: String,

    /// Absolute discount amount granted.
    pub amount: Money,

    /// When the wheel granted this code.
    #[ts(as = "String")]
    pub granted_at: DateTime<Utc>,

    /// When the code stops being redeemable.
    #[ts(as = "String")]
    pub expires_at: DateTime<Utc>,
}

impl PromotionGrant {
    /// Creates a grant valid for [`GRANT_VALIDITY_MINUTES`] from `now`.
    pub fn new(code: impl Into<String>, amount: Money, now: DateTime<Utc>) -> Self {
        PromotionGrant {
            code: code.into(),
            amount,
            granted_at: now,
            expires_at: now + Duration::minutes(GRANT_VALIDITY_MINUTES),
        }
    }

    /// Checks whether the grant has expired at `now`.
    ///
    /// The boundary instant counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Seconds of validity left at `now` (0 when expired).
    ///
    /// Drives the countdown shown next to the applied code.
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the applicable discount for a cart, if any.
///
/// ## Rules
/// - No grant, or an expired grant: `None` (expired == invalid, the caller
///   cannot tell the difference)
/// - The resolved amount is clamped to the cart subtotal
/// - A resolution that clamps to zero (empty cart) yields `None` rather
///   than a zero-amount discount
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use matera_core::cart::{Cart, LineItem};
/// use matera_core::discount::{resolve_discount, PromotionGrant};
/// use matera_core::money::Money;
///
/// let now = Utc::now();
/// let mut cart = Cart::new();
/// cart.add_line(
///     LineItem {
///         item_id: "mate-imperial".to_string(),
///         variant: None,
///         name: "Mate Imperial".to_string(),
///         unit_price: Money::from_pesos(45_000),
///         image_url: None,
///     },
///     1,
///     now,
/// )
/// .unwrap();
///
/// let grant = PromotionGrant::new("RUEDA10", Money::from_pesos(60_000), now);
/// let discount = resolve_discount(&cart, Some(&grant), now).unwrap();
///
/// // Clamped to the subtotal, so the total floors at exactly zero
/// assert_eq!(discount.amount, Money::from_pesos(45_000));
/// assert_eq!(cart.total(Some(&discount)), Money::zero());
/// ```
pub fn resolve_discount(
    cart: &Cart,
    grant: Option<&PromotionGrant>,
    now: DateTime<Utc>,
) -> Option<DiscountInfo> {
    let grant = grant?;

    if grant.is_expired(now) {
        return None;
    }

    let amount = grant.amount.min(cart.subtotal());
    if !amount.is_positive() {
        return None;
    }

    Some(DiscountInfo {
        code: grant.code.clone(),
        amount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
