//! # Cart Store
//!
//! The single source of truth for the session cart.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CartStore Lifecycle                               │
//! │                                                                         │
//! │  CartStore::open(kv)                                                   │
//! │       │                                                                 │
//! │       ├── snapshot found ───────► loaded cart                           │
//! │       ├── nothing stored ───────► empty cart                            │
//! │       └── corrupt / read error ─► empty cart (logged warning)           │
//! │                                                                         │
//! │  add_item / remove_item / adjust_quantity / clear                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────┐                       │
//! │  │ 1. apply the core cart rule (under the lock) │                       │
//! │  │ 2. persist the FULL snapshot                 │  ← before returning   │
//! │  │ 3. release lock, notify subscribers          │                       │
//! │  └──────────────────────────────────────────────┘                       │
//! │                                                                         │
//! │  Persist failure? ──► logged, swallowed. The in-memory cart stays       │
//! │                       authoritative and keeps serving the session.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Liveness
//! Construction performs exactly one read and falls back to an empty cart
//! on any failure, so consumers waiting on the store are never blocked by
//! a wedged or missing backing file.
//!
//! ## Thread Safety
//! The cart is wrapped in a `Mutex` because:
//! 1. Multiple routes may access/modify the cart
//! 2. Only one mutation runs at a time (single logical writer)
//! 3. Persistence happens inside the critical section, so a snapshot
//!    written to the store always matches some fully-applied state

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, error, warn};

use matera_core::cart::{Cart, LineItem};
use matera_core::error::CoreResult;

use crate::kv::KeyValueStore;
use crate::CART_KEY;

/// Capacity of the notification channel. Subscribers that lag this far
/// behind miss events rather than stalling mutations.
const EVENT_CHANNEL_CAPACITY: usize = 16;

// =============================================================================
// Cart Events
// =============================================================================

/// Notifications emitted by the store after a mutation.
///
/// UI concerns attach from outside through [`CartStore::subscribe`]: the
/// drawer reveal on add is an event consumers react to, not something the
/// cart knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// The cart contents changed (any successful mutation).
    Changed,
    /// An item was just added; the drawer should reveal itself.
    Opened,
    /// The cart was emptied via clear.
    Cleared,
}

// =============================================================================
// Cart Store
// =============================================================================

/// The persistent cart store.
///
/// ## Usage
/// ```rust,ignore
/// let kv = Arc::new(FileStore::open(data_dir)?);
/// let cart = CartStore::open(kv);
///
/// cart.add_item(product.line_item(None), 1)?;
/// let totals = cart.with_cart(|c| c.totals(None));
/// ```
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
    cart: Mutex<Cart>,
    events: broadcast::Sender<CartEvent>,
}

impl CartStore {
    /// Opens the store, loading the persisted snapshot if one exists.
    ///
    /// ## Degradation
    /// A missing snapshot starts an empty cart silently. A read failure or
    /// an unparsable snapshot also starts an empty cart, with a logged
    /// warning; the customer loses the stale cart, never the storefront.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let cart = Self::load(store.as_ref());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        CartStore {
            store,
            cart: Mutex::new(cart),
            events,
        }
    }

    fn load(store: &dyn KeyValueStore) -> Cart {
        let raw = match store.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                warn!(key = CART_KEY, error = %e, "Cart snapshot unreadable, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cart) => {
                debug!(key = CART_KEY, "Cart snapshot loaded");
                cart
            }
            Err(e) => {
                warn!(key = CART_KEY, error = %e, "Cart snapshot corrupt, starting empty");
                Cart::new()
            }
        }
    }

    /// Subscribes to mutation notifications.
    ///
    /// Every subscriber gets every event from the moment of subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Adds an item to the cart (merging per line identity) and persists.
    ///
    /// Emits [`CartEvent::Changed`] then [`CartEvent::Opened`]: adding is
    /// the one mutation that should reveal the drawer.
    pub fn add_item(&self, item: LineItem, quantity: i64) -> CoreResult<()> {
        {
            let mut cart = self.cart.lock().expect("Cart mutex poisoned");
            cart.add_line(item, quantity, Utc::now())?;
            self.persist(&cart);
        }

        self.notify(CartEvent::Changed);
        self.notify(CartEvent::Opened);
        Ok(())
    }

    /// Removes the line identified by `(item_id, variant)` and persists.
    ///
    /// Removing an absent line is a no-op: nothing is persisted and no
    /// event is emitted.
    pub fn remove_item(&self, item_id: &str, variant: Option<&str>) {
        let removed = {
            let mut cart = self.cart.lock().expect("Cart mutex poisoned");
            let removed = cart.remove_line(item_id, variant);
            if removed {
                self.persist(&cart);
            }
            removed
        };

        if removed {
            self.notify(CartEvent::Changed);
        } else {
            debug!(item_id, ?variant, "Remove ignored, line not in cart");
        }
    }

    /// Adjusts a line quantity by a signed delta and persists.
    ///
    /// The new quantity floors at 1 (see core cart rules). Adjusting an
    /// absent line is a no-op.
    pub fn adjust_quantity(&self, item_id: &str, variant: Option<&str>, delta: i64) {
        let adjusted = {
            let mut cart = self.cart.lock().expect("Cart mutex poisoned");
            let adjusted = cart.adjust_quantity(item_id, variant, delta);
            if adjusted {
                self.persist(&cart);
            }
            adjusted
        };

        if adjusted {
            self.notify(CartEvent::Changed);
        } else {
            debug!(item_id, ?variant, "Adjust ignored, line not in cart");
        }
    }

    /// Empties the cart and persists the empty snapshot.
    ///
    /// Clearing an already-empty cart is a no-op.
    pub fn clear(&self) {
        let cleared = {
            let mut cart = self.cart.lock().expect("Cart mutex poisoned");
            if cart.is_empty() {
                false
            } else {
                cart.clear();
                self.persist(&cart);
                true
            }
        };

        if cleared {
            self.notify(CartEvent::Changed);
            self.notify(CartEvent::Cleared);
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_store.with_cart(|cart| cart.totals(discount.as_ref()));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Returns an owned copy of the current cart (for checkout freezing).
    pub fn snapshot(&self) -> Cart {
        self.cart.lock().expect("Cart mutex poisoned").clone()
    }

    /// Persists the full snapshot. Failures are logged, never returned:
    /// the in-memory cart remains authoritative for the session.
    fn persist(&self, cart: &Cart) {
        let json = match serde_json::to_string(cart) {
            Ok(json) => json,
            Err(e) => {
                error!(key = CART_KEY, error = %e, "Cart snapshot serialization failed");
                return;
            }
        };

        if let Err(e) = self.store.set(CART_KEY, &json) {
            error!(key = CART_KEY, error = %e, "Cart persist failed, keeping in-memory state");
        }
    }

    fn notify(&self, event: CartEvent) {
        // send only errs when nobody is subscribed, which is fine
        let _ = self.events.send(event);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileStore, MemoryStore};
    use crate::SessionResult;
    use matera_core::money::Money;
    use tokio::sync::broadcast::error::TryRecvError;

    fn item(id: &str, pesos: i64, variant: Option<&str>) -> LineItem {
        LineItem {
            item_id: id.to_string(),
            variant: variant.map(String::from),
            name: format!("Item {}", id),
            unit_price: Money::from_pesos(pesos),
            image_url: None,
        }
    }

    #[test]
    fn opens_empty_when_nothing_stored() {
        let kv = Arc::new(MemoryStore::new());
        let store = CartStore::open(kv);

        assert!(store.with_cart(|c| c.is_empty()));
    }

    #[test]
    fn mutations_persist_before_returning() {
        let kv = Arc::new(MemoryStore::new());

        let store = CartStore::open(kv.clone());
        store.add_item(item("mate-imperial", 45_000, None), 2).unwrap();

        // A second store over the same kv simulates a restart right after
        // the mutation returned: it must observe the post-mutation state
        let restarted = CartStore::open(kv);
        assert_eq!(restarted.with_cart(|c| c.total_item_count()), 2);
        assert_eq!(
            restarted.with_cart(|c| c.subtotal()),
            Money::from_pesos(90_000)
        );
    }

    #[test]
    fn file_backed_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        {
            let kv = Arc::new(FileStore::open(dir.path()).unwrap());
            let store = CartStore::open(kv);
            store
                .add_item(item("mate-imperial", 45_000, Some("#000000")), 1)
                .unwrap();
            store.adjust_quantity("mate-imperial", Some("#000000"), 2);
        }

        let kv = Arc::new(FileStore::open(dir.path()).unwrap());
        let store = CartStore::open(kv);

        let cart = store.snapshot();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[0].variant.as_deref(), Some("#000000"));
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_empty() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(CART_KEY, "definitely not json").unwrap();

        let store = CartStore::open(kv.clone());
        assert!(store.with_cart(|c| c.is_empty()));

        // The store still works; the next mutation overwrites the junk
        store.add_item(item("yerba-rosamonte", 12_500, None), 1).unwrap();
        let restarted = CartStore::open(kv);
        assert_eq!(restarted.with_cart(|c| c.line_count()), 1);
    }

    #[test]
    fn persist_failure_keeps_memory_authoritative() {
        struct FailingStore;

        impl KeyValueStore for FailingStore {
            fn get(&self, _key: &str) -> SessionResult<Option<String>> {
                Ok(None)
            }
            fn set(&self, key: &str, _value: &str) -> SessionResult<()> {
                Err(crate::SessionError::write_failed(key, "disk full"))
            }
            fn remove(&self, _key: &str) -> SessionResult<()> {
                Ok(())
            }
        }

        let store = CartStore::open(Arc::new(FailingStore));

        // The caller never sees the persistence failure
        store.add_item(item("mate-imperial", 45_000, None), 1).unwrap();

        // And the in-memory cart kept the mutation
        assert_eq!(store.with_cart(|c| c.line_count()), 1);
    }

    #[test]
    fn add_emits_changed_then_opened() {
        let store = CartStore::open(Arc::new(MemoryStore::new()));
        let mut rx = store.subscribe();

        store.add_item(item("mate-imperial", 45_000, None), 1).unwrap();

        assert_eq!(rx.try_recv().unwrap(), CartEvent::Changed);
        assert_eq!(rx.try_recv().unwrap(), CartEvent::Opened);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn noop_mutations_emit_nothing() {
        let kv = Arc::new(MemoryStore::new());
        let store = CartStore::open(kv.clone());
        let mut rx = store.subscribe();

        store.remove_item("not-here", None);
        store.adjust_quantity("not-here", None, 1);
        store.clear(); // already empty

        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
        // And nothing was persisted either
        assert_eq!(kv.get(CART_KEY).unwrap(), None);
    }

    #[test]
    fn clear_persists_the_empty_snapshot() {
        let kv = Arc::new(MemoryStore::new());
        let store = CartStore::open(kv.clone());

        store.add_item(item("mate-imperial", 45_000, None), 1).unwrap();
        let mut rx = store.subscribe();
        store.clear();

        assert_eq!(rx.try_recv().unwrap(), CartEvent::Changed);
        assert_eq!(rx.try_recv().unwrap(), CartEvent::Cleared);

        let restarted = CartStore::open(kv);
        assert!(restarted.with_cart(|c| c.is_empty()));
    }

    #[test]
    fn remove_and_adjust_respect_variants() {
        let store = CartStore::open(Arc::new(MemoryStore::new()));

        store
            .add_item(item("mate-imperial", 45_000, Some("#000000")), 1)
            .unwrap();
        store
            .add_item(item("mate-imperial", 45_000, Some("natural")), 1)
            .unwrap();

        store.remove_item("mate-imperial", Some("#000000"));

        let cart = store.snapshot();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].variant.as_deref(), Some("natural"));
    }
}
