//! # Grant Store
//!
//! Storage slot for the wheel-granted promotion code.
//!
//! ## One-Directional Signal
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Wheel Grant Lifecycle                              │
//! │                                                                         │
//! │  Wheel spin lands on a discount wedge                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GrantStore::save(grant) ──► <data_dir>/matera.wheel-grant.v1.json      │
//! │                                                                         │
//! │  Cart view / checkout:                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GrantStore::active(now) ─┬─► Some(grant)    (valid, non-consuming)     │
//! │                           │                                             │
//! │                           └─► None           expired or corrupt values  │
//! │                                              are REMOVED on read, so    │
//! │                                              a dead grant never         │
//! │                                              lingers in the store       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reading is non-consuming: the same grant resolves on every cart view
//! until it expires. Only expiry (or corruption) removes it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use matera_core::discount::PromotionGrant;

use crate::error::SessionResult;
use crate::kv::KeyValueStore;
use crate::GRANT_KEY;

/// Storage for the single active promotion grant.
#[derive(Clone)]
pub struct GrantStore {
    store: Arc<dyn KeyValueStore>,
}

impl GrantStore {
    /// Creates a grant store over the shared key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        GrantStore { store }
    }

    /// Writes the grant, replacing any previous one.
    ///
    /// Errors propagate so the wheel service can log a grant that could
    /// not be made durable; it still reports the spin outcome.
    pub fn save(&self, grant: &PromotionGrant) -> SessionResult<()> {
        let json = serde_json::to_string(grant)
            .map_err(|e| crate::SessionError::write_failed(GRANT_KEY, e))?;

        self.store.set(GRANT_KEY, &json)?;
        debug!(code = %grant.code, expires_at = %grant.expires_at, "Promotion grant stored");
        Ok(())
    }

    /// Returns the stored grant if it is still valid at `now`.
    ///
    /// ## Scrubbing
    /// Expired and corrupt values are removed on read. An expired grant is
    /// indistinguishable from no grant, exactly like resolution treats it.
    pub fn active(&self, now: DateTime<Utc>) -> Option<PromotionGrant> {
        let raw = match self.store.get(GRANT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = GRANT_KEY, error = %e, "Grant unreadable, treating as absent");
                return None;
            }
        };

        let grant: PromotionGrant = match serde_json::from_str(&raw) {
            Ok(grant) => grant,
            Err(e) => {
                warn!(key = GRANT_KEY, error = %e, "Grant corrupt, scrubbing");
                self.scrub();
                return None;
            }
        };

        if grant.is_expired(now) {
            debug!(code = %grant.code, "Grant expired, scrubbing");
            self.scrub();
            return None;
        }

        Some(grant)
    }

    fn scrub(&self) {
        if let Err(e) = self.store.remove(GRANT_KEY) {
            warn!(key = GRANT_KEY, error = %e, "Failed to scrub dead grant");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::Duration;
    use matera_core::money::Money;

    #[test]
    fn save_then_active_round_trips() {
        let kv = Arc::new(MemoryStore::new());
        let grants = GrantStore::new(kv);
        let now = Utc::now();

        let grant = PromotionGrant::new("RUEDA10", Money::from_pesos(4_500), now);
        grants.save(&grant).unwrap();

        let loaded = grants.active(now).unwrap();
        assert_eq!(loaded, grant);

        // Non-consuming: still there on the next read
        assert!(grants.active(now).is_some());
    }

    #[test]
    fn expired_grant_is_scrubbed_on_read() {
        let kv = Arc::new(MemoryStore::new());
        let grants = GrantStore::new(kv.clone());
        let now = Utc::now();

        let grant = PromotionGrant::new(
            "RUEDA10",
            Money::from_pesos(4_500),
            now - Duration::minutes(16),
        );
        grants.save(&grant).unwrap();

        assert_eq!(grants.active(now), None);
        // The dead value was removed from the store, not just hidden
        assert_eq!(kv.get(GRANT_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_grant_is_scrubbed_on_read() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(GRANT_KEY, "garbage").unwrap();

        let grants = GrantStore::new(kv.clone());
        assert_eq!(grants.active(Utc::now()), None);
        assert_eq!(kv.get(GRANT_KEY).unwrap(), None);
    }

    #[test]
    fn absent_grant_is_none() {
        let grants = GrantStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(grants.active(Utc::now()), None);
    }

    #[test]
    fn save_replaces_previous_grant() {
        let kv = Arc::new(MemoryStore::new());
        let grants = GrantStore::new(kv);
        let now = Utc::now();

        grants
            .save(&PromotionGrant::new("RUEDA10", Money::from_pesos(4_500), now))
            .unwrap();
        grants
            .save(&PromotionGrant::new("RUEDA20", Money::from_pesos(9_000), now))
            .unwrap();

        assert_eq!(grants.active(now).unwrap().code, "RUEDA20");
    }
}
