//! # Boundary Clients
//!
//! Interfaces to everything outside the storefront process: the product
//! catalog, the lead log, and the sales assistant. Each boundary is a trait
//! so routes and services stay testable without the real backing service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Boundary Clients                       │
//! │                                                             │
//! │  CatalogSource ──► products and combos for sale             │
//! │  LeadSink ───────► best-effort order record (JSONL)         │
//! │  SalesAssistant ─► product Q&A with a fixed apology         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod assistant;
mod catalog;
mod leads;

pub use assistant::{ScriptedAssistant, SalesAssistant, FALLBACK_REPLY};
pub use catalog::{CatalogSource, SeedCatalog};
pub use leads::{JsonlLeadSink, LeadSink, MemoryLeadSink};

use thiserror::Error;

/// Errors crossing a boundary client.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The catalog backend did not answer.
    #[error("catalog unavailable: {message}")]
    CatalogUnavailable { message: String },

    /// The lead sink refused or failed to record the order.
    #[error("lead rejected: {message}")]
    LeadRejected { message: String },

    /// The assistant backend did not answer.
    #[error("assistant unavailable: {message}")]
    AssistantUnavailable { message: String },
}

impl ClientError {
    /// Creates a catalog error.
    pub fn catalog(message: impl ToString) -> Self {
        ClientError::CatalogUnavailable {
            message: message.to_string(),
        }
    }

    /// Creates a lead sink error.
    pub fn lead(message: impl ToString) -> Self {
        ClientError::LeadRejected {
            message: message.to_string(),
        }
    }

    /// Creates an assistant error.
    pub fn assistant(message: impl ToString) -> Self {
        ClientError::AssistantUnavailable {
            message: message.to_string(),
        }
    }
}

/// Result type for boundary client operations.
pub type ClientResult<T> = Result<T, ClientError>;
