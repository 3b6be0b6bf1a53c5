//! # Cart Module
//!
//! The cart value type and its mutation rules.
//!
//! ## Line Identity
//! A line is identified by the pair `(item_id, variant)`. The same product
//! in two different colors occupies two lines; adding the same pair twice
//! merges into one line with a higher quantity.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                                   │
//! │                                                                         │
//! │  Storefront Action        Operation               Cart Change           │
//! │  ─────────────────        ─────────               ───────────           │
//! │                                                                         │
//! │  Click "Agregar" ────────► add_line() ──────────► merge or push         │
//! │                                                                         │
//! │  Drawer +/- buttons ─────► adjust_quantity() ───► qty = max(1, qty+δ)   │
//! │                                                                         │
//! │  Click trash icon ───────► remove_line() ───────► retain others         │
//! │                                                                         │
//! │  After hand-off ─────────► clear() ─────────────► lines.clear()         │
//! │                                                                         │
//! │  NOTE: quantity can never reach 0 through adjust_quantity. The only     │
//! │        ways a line leaves the cart are remove_line and clear.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This type is pure: it never touches a store, a clock, or the catalog.
//! Timestamps are injected by the caller, persistence lives in
//! `matera-session`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::DiscountInfo;
use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_item_id, validate_price, validate_quantity};

// =============================================================================
// Cart Line
// =============================================================================

/// One purchasable line in the cart.
///
/// ## Design Notes
/// - `item_id` + `variant`: Line identity (see module docs)
/// - `unit_price`, `name`, `image_url`: Frozen copies taken when the line
///   was added. The cart displays consistent data even if the catalog
///   changes afterwards, and prices are never re-validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Product or combo ID this line refers to.
    pub item_id: String,

    /// Selected variant (color), if the item has one.
    /// `None` and `Some` are distinct line identities.
    pub variant: Option<String>,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    /// This is critical: we lock in the price when the line is added.
    pub unit_price: Money,

    /// Quantity in cart. Always >= 1.
    pub quantity: i64,

    /// Item image at time of adding (frozen), for the drawer UI.
    pub image_url: Option<String>,

    /// When this line was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Checks whether this line is identified by `(item_id, variant)`.
    fn matches(&self, item_id: &str, variant: Option<&str>) -> bool {
        self.item_id == item_id && self.variant.as_deref() == variant
    }
}

// =============================================================================
// Line Item (add payload)
// =============================================================================

/// The catalog-side snapshot handed to [`Cart::add_line`].
///
/// Carries the identity and the display/price data to freeze into the new
/// line. Built by the caller from a catalog product or combo.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub item_id: String,
    pub variant: Option<String>,
    pub name: String,
    pub unit_price: Money,
    pub image_url: Option<String>,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `(item_id, variant)` (adding the same pair merges)
/// - Quantity of every line is >= 1
/// - Line order is insertion order (stable for the drawer UI)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export)]
pub struct Cart {
    /// Lines in the cart, in insertion order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds an item to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - If `(item_id, variant)` already in cart: increases quantity,
    ///   saturating at the `i64` limit
    /// - Otherwise: appends a new line with frozen price/display data
    ///
    /// ## Errors
    /// Rejects non-positive quantities, empty item IDs, and negative
    /// prices before touching any state.
    pub fn add_line(
        &mut self,
        item: LineItem,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;
        validate_item_id(&item.item_id)?;
        validate_price(item.unit_price)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&item.item_id, item.variant.as_deref()))
        {
            line.quantity = line.quantity.saturating_add(quantity);
            return Ok(());
        }

        self.lines.push(CartLine {
            item_id: item.item_id,
            variant: item.variant,
            name: item.name,
            unit_price: item.unit_price,
            quantity,
            image_url: item.image_url,
            added_at: now,
        });
        Ok(())
    }

    /// Removes the line identified by `(item_id, variant)`.
    ///
    /// ## Behavior
    /// Exact-match removal. Removing a line that is not present is a
    /// silent no-op, not an error.
    ///
    /// ## Returns
    /// `true` if a line was removed.
    pub fn remove_line(&mut self, item_id: &str, variant: Option<&str>) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| !l.matches(item_id, variant));
        self.lines.len() != initial_len
    }

    /// Adjusts the quantity of a line by a signed delta.
    ///
    /// ## Behavior
    /// - New quantity is `max(1, current + delta)`, with the addition
    ///   saturating at the `i64` limits: decrementing can never drive a
    ///   line below 1, and never removes it
    /// - Adjusting a line that is not present is a silent no-op
    ///
    /// ## Returns
    /// `true` if a line was found and adjusted.
    pub fn adjust_quantity(&mut self, item_id: &str, variant: Option<&str>, delta: i64) -> bool {
        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(item_id, variant)) {
            line.quantity = line.quantity.saturating_add(delta).max(1);
            true
        } else {
            false
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the line identified by `(item_id, variant)`, if present.
    pub fn line(&self, item_id: &str, variant: Option<&str>) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(item_id, variant))
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines (the cart badge number).
    pub fn total_item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Calculates the subtotal (sum of line totals).
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc.saturating_add(l.line_total()))
    }

    /// Calculates the payable total after an optional discount.
    ///
    /// The discount can consume the whole subtotal but the total is
    /// floored at zero.
    pub fn total(&self, discount: Option<&DiscountInfo>) -> Money {
        match discount {
            Some(d) => self.subtotal().sub_to_zero(d.amount),
            None => self.subtotal(),
        }
    }

    /// Builds the totals summary for API responses.
    pub fn totals(&self, discount: Option<&DiscountInfo>) -> CartTotals {
        CartTotals {
            line_count: self.line_count(),
            item_count: self.total_item_count(),
            subtotal: self.subtotal(),
            discount: discount.map(|d| d.amount).unwrap_or_default(),
            total: self.total(discount),
        }
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
