//! # Matera Storefront Server
//!
//! Core library for the Matera storefront HTTP server.
//! This is the main entry point that assembles state and serves the API.
//!
//! ## Module Organization
//! ```text
//! matera_storefront/
//! ├── lib.rs          ◄─── You are here (startup & serve)
//! ├── routes/
//! │   ├── mod.rs      ◄─── Router assembly
//! │   ├── catalog.rs  ◄─── Product/combo listings
//! │   ├── cart.rs     ◄─── Session cart manipulation
//! │   ├── checkout.rs ◄─── WhatsApp hand-off
//! │   ├── wheel.rs    ◄─── Promotional wheel
//! │   ├── assistant.rs◄─── Product Q&A
//! │   └── admin.rs    ◄─── Lead log & manual sales
//! ├── services/       ◄─── The decisions behind the routes
//! ├── clients/        ◄─── Catalog, lead sink, assistant boundaries
//! ├── state.rs        ◄─── Shared AppState assembly
//! ├── config.rs       ◄─── TOML + env configuration
//! ├── whatsapp.rs     ◄─── Order message & wa.me link
//! └── error.rs        ◄─── API error type for responses
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod whatsapp;

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use matera_session::CartStore;

use crate::config::StorefrontConfig;
use crate::state::AppState;

/// Runs the storefront server until shutdown.
///
/// ## Startup Sequence
/// ```text
/// ┌───────────────────────────────────────────────────────────────────┐
/// │                      Application Startup                          │
/// │                                                                   │
/// │  1. Initialize Logging ─────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                          │
/// │     • Default: INFO, can be overridden with RUST_LOG              │
/// │                                                                   │
/// │  2. Load Configuration ─────────────────────────────────────────► │
/// │     • storefront.toml, then MATERA_* env overrides                │
/// │     • Falls back to defaults on any load error                    │
/// │                                                                   │
/// │  3. Assemble State ─────────────────────────────────────────────► │
/// │     • Session store (file-backed, memory fallback)                │
/// │     • Lead log, catalog, assistant, validated prize table         │
/// │                                                                   │
/// │  4. Serve ──────────────────────────────────────────────────────► │
/// │     • axum over tokio, graceful shutdown on SIGINT/SIGTERM        │
/// └───────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Matera storefront server");

    let config = StorefrontConfig::load_or_default(None);
    let addr = config.server.bind_address();
    info!(
        store = %config.store.name,
        whatsapp = %config.store.whatsapp_number,
        "Configuration loaded"
    );

    let state = AppState::initialize(config)?;
    tokio::spawn(log_cart_events(state.cart.clone()));

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=matera_storefront=trace` - Trace for the server only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,matera_storefront=debug,matera_session=debug")
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Logs cart activity as it happens.
///
/// The UI reacts to mutations through the cart responses it gets back;
/// this subscriber gives the operator the same visibility in the logs.
async fn log_cart_events(cart: Arc<CartStore>) {
    let mut events = cart.subscribe();
    loop {
        match events.recv().await {
            Ok(event) => debug!(?event, "Cart event"),
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "Cart event subscriber lagged")
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
