//! # matera-core: Pure Business Logic for the Matera Storefront
//!
//! This crate is the **heart** of the Matera storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Matera Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (Web Storefront)                    │   │
//! │  │    Catalog UI ──► Cart Drawer ──► Checkout ──► WhatsApp         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Axum Routes (apps/storefront)                │   │
//! │  │    list_products, add_to_cart, checkout, spin_wheel, etc.       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ matera-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ discount  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  resolve  │  │   │
//! │  │   │   Combo   │  │  es-AR fmt│  │ CartLine  │  │   wheel   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                matera-session (Persistence Layer)               │   │
//! │  │           Key-value store, cart store, wheel grants             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Combo, LeadRecord, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart value type and its mutation rules
//! - [`discount`] - Promotion grants and discount resolution
//! - [`wheel`] - Weighted prize selection for the promotional wheel
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Store, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Injected Time**: Anything time-dependent takes `now` as a parameter
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use matera_core::cart::{Cart, LineItem};
//! use matera_core::money::Money;
//!
//! let mut cart = Cart::default();
//! let mate = LineItem {
//!     item_id: "mate-imperial".to_string(),
//!     variant: None,
//!     name: "Mate Imperial".to_string(),
//!     unit_price: Money::from_pesos(45_000),
//!     image_url: None,
//! };
//!
//! // Adding the same item twice merges into one line
//! cart.add_line(mate.clone(), 1, Utc::now()).unwrap();
//! cart.add_line(mate, 1, Utc::now()).unwrap();
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.subtotal(), Money::from_pesos(90_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod wheel;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use matera_core::Money` instead of
// `use matera_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals, LineItem};
pub use discount::{resolve_discount, DiscountInfo, PromotionGrant};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_price, Money};
pub use types::*;
pub use validation::{validate_shipping, ValidationResult};
pub use wheel::{pick_prize, total_weight, validate_prizes, PrizeKind, WheelPrize};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// How long a wheel-granted discount code stays redeemable, in minutes.
///
/// ## Business Reason
/// The wheel is an impulse mechanic: the prize must be used in the same
/// session it was won. A short window keeps codes from circulating.
pub const GRANT_VALIDITY_MINUTES: i64 = 15;
