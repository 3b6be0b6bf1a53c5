//! # Service Layer
//!
//! The operations behind the HTTP routes. Routes stay thin: they decode the
//! request, call one function here, and encode the response. Everything with
//! a decision in it (stock policy, discount resolution, hand-off side
//! effects, spin rules) lives in this layer where it can be tested without
//! a server.

mod checkout;
mod items;
mod wheel;

pub use checkout::{place_order, record_manual_sale, ManualLine, PlacedOrder};
pub use items::{add_to_cart, resolve_line_item};
pub use wheel::{spin, SpinOutcome};
