//! # Session Error Types
//!
//! Error types for session store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  I/O error (std::io) or parse error (serde_json)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionError (this module) ← Adds the key and operation context        │
//! │       │                                                                 │
//! │       ├──► Cart path: LOGGED and swallowed, the in-memory cart          │
//! │       │    stays authoritative (never reaches the frontend)             │
//! │       │                                                                 │
//! │       └──► Grant path: logged by the wheel service, spin outcome        │
//! │            still returned                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Session store operation errors.
///
/// These errors wrap I/O and parse failures with the key being accessed,
/// so a log line is enough to locate the bad file.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backing directory could not be prepared.
    ///
    /// ## When This Occurs
    /// - Data directory doesn't exist and can't be created
    /// - File permissions issue
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Reading a value failed.
    #[error("Read failed for {key}: {message}")]
    ReadFailed { key: String, message: String },

    /// Writing a value failed.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Temp file could not be renamed into place
    #[error("Write failed for {key}: {message}")]
    WriteFailed { key: String, message: String },
}

impl SessionError {
    /// Creates a ReadFailed error for a key.
    pub fn read_failed(key: impl Into<String>, message: impl ToString) -> Self {
        SessionError::ReadFailed {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Creates a WriteFailed error for a key.
    pub fn write_failed(key: impl Into<String>, message: impl ToString) -> Self {
        SessionError::WriteFailed {
            key: key.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_key_context() {
        let err = SessionError::write_failed("matera.cart.v1", "disk full");
        assert_eq!(err.to_string(), "Write failed for matera.cart.v1: disk full");

        let err = SessionError::read_failed("matera.wheel-grant.v1", "permission denied");
        assert_eq!(
            err.to_string(),
            "Read failed for matera.wheel-grant.v1: permission denied"
        );
    }
}
