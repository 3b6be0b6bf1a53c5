//! # matera-session: Durable Session Storage for the Matera Storefront
//!
//! This crate keeps the customer's session alive across restarts: the cart
//! a customer builds today is still there tomorrow.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Matera Session Data Flow                           │
//! │                                                                         │
//! │  Axum route (add_to_cart)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  matera-session (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ KeyValueStore │    │   CartStore   │    │  GrantStore  │  │   │
//! │  │   │   (kv.rs)     │    │(cart_store.rs)│    │ (grants.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ FileStore     │◄───│ load/persist  │    │ save/active  │  │   │
//! │  │   │ MemoryStore   │◄───│ + broadcast   │    │ expiry scrub │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Data directory (one file per key)                  │   │
//! │  │   <data_dir>/matera.cart.v1.json                                │   │
//! │  │   <data_dir>/matera.wheel-grant.v1.json                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degradation Contract
//!
//! The store is best-effort by design:
//! - A missing or unparsable snapshot loads as an EMPTY cart (logged)
//! - A persist failure is logged; the in-memory cart stays authoritative
//!   and keeps serving the session
//! - Callers of mutation methods never see a persistence error
//!
//! ## Module Organization
//!
//! - [`kv`] - Key-value store trait, file-backed and in-memory impls
//! - [`cart_store`] - The persistent cart store with change notifications
//! - [`grants`] - Wheel-grant slot with expiry scrubbing
//! - [`error`] - Session error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod error;
pub mod grants;
pub mod kv;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::{CartEvent, CartStore};
pub use error::{SessionError, SessionResult};
pub use grants::GrantStore;
pub use kv::{FileStore, KeyValueStore, MemoryStore};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Store key for the persisted cart snapshot.
///
/// ## Why versioned?
/// The suffix lets a future snapshot format change read old carts
/// explicitly instead of failing to parse them.
pub const CART_KEY: &str = "matera.cart.v1";

/// Store key for the wheel-granted promotion code.
pub const GRANT_KEY: &str = "matera.wheel-grant.v1";
