//! # Lead Sink
//!
//! Best-effort record of every order that was handed off to WhatsApp.
//! The sink is advisory: checkout treats a failed submit as a logged
//! warning, never as a reason to block the customer from messaging.
//!
//! The default sink is an append-only JSONL file, one [`LeadRecord`] per
//! line. Append-only keeps writes cheap and makes the log greppable; no
//! record is ever rewritten.

use std::path::PathBuf;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use matera_core::LeadRecord;

use super::{ClientError, ClientResult};

/// File name of the append-only lead log inside the data directory.
const LEADS_FILE: &str = "leads.jsonl";

/// Where handed-off orders get recorded.
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Appends one lead. Callers treat failure as advisory.
    async fn submit(&self, lead: &LeadRecord) -> ClientResult<()>;

    /// All recorded leads, oldest first.
    async fn list(&self) -> ClientResult<Vec<LeadRecord>>;
}

/// Append-only JSONL lead log.
pub struct JsonlLeadSink {
    path: PathBuf,
    /// Serializes appends so two checkouts never interleave half-written lines.
    write_lock: Mutex<()>,
}

impl JsonlLeadSink {
    /// Opens (or creates) the lead log under `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        Ok(JsonlLeadSink {
            path: dir.join(LEADS_FILE),
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl LeadSink for JsonlLeadSink {
    async fn submit(&self, lead: &LeadRecord) -> ClientResult<()> {
        let mut line = serde_json::to_string(lead).map_err(ClientError::lead)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(ClientError::lead)?;

        file.write_all(line.as_bytes())
            .await
            .map_err(ClientError::lead)?;
        file.flush().await.map_err(ClientError::lead)?;

        debug!(lead_id = %lead.id, path = ?self.path, "Lead appended");
        Ok(())
    }

    async fn list(&self) -> ClientResult<Vec<LeadRecord>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ClientError::lead(e)),
        };

        let mut leads = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LeadRecord>(line) {
                Ok(lead) => leads.push(lead),
                Err(e) => {
                    // A torn or hand-edited line must not hide the rest of the log
                    warn!(line = idx + 1, "Skipping malformed lead record: {}", e);
                }
            }
        }

        Ok(leads)
    }
}

/// In-memory sink, used when no data directory is available.
#[derive(Default)]
pub struct MemoryLeadSink {
    leads: StdMutex<Vec<LeadRecord>>,
}

impl MemoryLeadSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadSink for MemoryLeadSink {
    async fn submit(&self, lead: &LeadRecord) -> ClientResult<()> {
        let mut leads = self.leads.lock().expect("Lead sink mutex poisoned");
        leads.push(lead.clone());
        Ok(())
    }

    async fn list(&self) -> ClientResult<Vec<LeadRecord>> {
        let leads = self.leads.lock().expect("Lead sink mutex poisoned");
        Ok(leads.clone())
    }
}
