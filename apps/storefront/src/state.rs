//! # Application State
//!
//! Everything the HTTP handlers share, assembled once at startup.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         AppState                            │
//! │                                                             │
//! │  config ───► StorefrontConfig (identity, policies, wheel)   │
//! │  cart ─────► CartStore over the session key-value store     │
//! │  grants ───► GrantStore over the same key-value store       │
//! │  prizes ───► validated wheel table from config              │
//! │  catalog ──► CatalogSource (seed data)                      │
//! │  leads ────► LeadSink (JSONL log, memory fallback)          │
//! │  assistant ► SalesAssistant (scripted over the catalog)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage degrades instead of failing: when the data directory cannot be
//! used, the session store and the lead log fall back to memory and the
//! storefront keeps selling for the life of the process.

use std::sync::Arc;

use tracing::{info, warn};

use matera_core::WheelPrize;
use matera_session::{CartStore, FileStore, GrantStore, KeyValueStore, MemoryStore};

use crate::clients::{
    CatalogSource, JsonlLeadSink, LeadSink, MemoryLeadSink, SalesAssistant, ScriptedAssistant,
    SeedCatalog,
};
use crate::config::{ConfigError, StorefrontConfig};

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration.
    pub config: Arc<StorefrontConfig>,

    /// The session cart.
    pub cart: Arc<CartStore>,

    /// The session wheel grant.
    pub grants: GrantStore,

    /// Validated prize table, in wheel order.
    pub prizes: Arc<Vec<WheelPrize>>,

    /// Product and combo source.
    pub catalog: Arc<dyn CatalogSource>,

    /// Best-effort order record.
    pub leads: Arc<dyn LeadSink>,

    /// Product Q&A.
    pub assistant: Arc<dyn SalesAssistant>,
}

impl AppState {
    /// Builds the full state from configuration.
    ///
    /// Fails only on configuration errors (a bad prize table, a malformed
    /// WhatsApp number). Storage problems downgrade to memory with a warning.
    pub fn initialize(config: StorefrontConfig) -> Result<Self, ConfigError> {
        let prizes = config.prize_table()?;

        let kv = open_session_store(&config);
        let cart = Arc::new(CartStore::open(kv.clone()));
        let grants = GrantStore::new(kv);

        let leads = open_lead_sink(&config);

        let catalog: Arc<dyn CatalogSource> = Arc::new(SeedCatalog::new());
        let assistant: Arc<dyn SalesAssistant> = Arc::new(ScriptedAssistant::new(
            catalog.clone(),
            config.store.name.clone(),
        ));

        Ok(AppState {
            config: Arc::new(config),
            cart,
            grants,
            prizes: Arc::new(prizes),
            catalog,
            leads,
            assistant,
        })
    }
}

/// Opens the persistent session store, falling back to memory.
fn open_session_store(config: &StorefrontConfig) -> Arc<dyn KeyValueStore> {
    let Some(data_dir) = config.data_dir() else {
        warn!("No data directory available, session state will not survive restarts");
        return Arc::new(MemoryStore::new());
    };

    let session_dir = data_dir.join("session");
    match FileStore::open(&session_dir) {
        Ok(store) => {
            info!(path = ?session_dir, "Session store opened");
            Arc::new(store)
        }
        Err(e) => {
            warn!(
                path = ?session_dir,
                "Could not open session store: {}. Falling back to memory.", e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

/// Opens the JSONL lead log, falling back to memory.
fn open_lead_sink(config: &StorefrontConfig) -> Arc<dyn LeadSink> {
    let Some(data_dir) = config.data_dir() else {
        warn!("No data directory available, leads will not survive restarts");
        return Arc::new(MemoryLeadSink::new());
    };

    match JsonlLeadSink::open(&data_dir) {
        Ok(sink) => {
            info!(path = ?data_dir, "Lead log opened");
            Arc::new(sink)
        }
        Err(e) => {
            warn!(
                path = ?data_dir,
                "Could not open lead log: {}. Falling back to memory.", e
            );
            Arc::new(MemoryLeadSink::new())
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Fully in-memory state for tests, seeded with the default config.
    pub(crate) fn in_memory() -> Self {
        let config = StorefrontConfig::default();
        let prizes = config.prize_table().unwrap();

        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let cart = Arc::new(CartStore::open(kv.clone()));
        let grants = GrantStore::new(kv);

        let catalog: Arc<dyn CatalogSource> = Arc::new(SeedCatalog::new());
        let assistant: Arc<dyn SalesAssistant> = Arc::new(ScriptedAssistant::new(
            catalog.clone(),
            config.store.name.clone(),
        ));

        AppState {
            config: Arc::new(config),
            cart,
            grants,
            prizes: Arc::new(prizes),
            catalog,
            leads: Arc::new(MemoryLeadSink::new()),
            assistant,
        }
    }
}
