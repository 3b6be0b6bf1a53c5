//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  POST /api/cart                                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Route Handler                                                   │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog miss? ──── ApiError::not_found ───────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Validation? ────── CoreError::Validation ─────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  fetch('/api/cart', ...).then(r => {                                    │
//! │    // status 404, body:                                                 │
//! │    // { "code": "NOT_FOUND", "message": "Item not found: xyz" }         │
//! │  })                                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence failures never reach this type: the session layer logs and
//! swallows them, so the API surface only ever reports input problems,
//! missing items, and genuine internal faults.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use matera_core::{CoreError, ValidationError};

use crate::clients::ClientError;

/// API error returned from route handlers.
///
/// ## Serialization
/// This is what the frontend receives when a request fails:
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for mate-imperial: available 12, requested 50"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// const res = await fetch('/api/wheel/spin', { method: 'POST' });
/// if (!res.ok) {
///   const err = await res.json();
///   switch (err.code) {
///     case 'WHEEL_ALREADY_SPUN':
///       showActivePrize();
///       break;
///     case 'VALIDATION_ERROR':
///       showForm(err.message);
///       break;
///     default:
///       showError('Algo salió mal');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Requested quantity exceeds catalog stock (422)
    InsufficientStock,

    /// Checkout attempted on an empty cart (422)
    EmptyCart,

    /// A live prize grant blocks another spin (409)
    WheelAlreadySpun,

    /// External catalog backend unreachable (502)
    CatalogUnavailable,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// HTTP status for this error's code.
    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InsufficientStock => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::EmptyCart => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::WheelAlreadySpun => StatusCode::CONFLICT,
            ErrorCode::CatalogUnavailable => StatusCode::BAD_GATEWAY,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                item_id,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: available {}, requested {}",
                    item_id, available, requested
                ),
            ),
            CoreError::EmptyCart => {
                ApiError::new(ErrorCode::EmptyCart, "Cart is empty, nothing to check out")
            }
            CoreError::InvalidPrizeTable { reason } => {
                // A bad prize table is a deployment problem, not the caller's
                tracing::error!(%reason, "Prize table rejected");
                ApiError::internal("Prize table misconfigured")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts boundary client errors to API errors.
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::CatalogUnavailable { message } => {
                tracing::error!(%message, "Catalog backend failed");
                ApiError::new(ErrorCode::CatalogUnavailable, "Catalog unavailable")
            }
            ClientError::LeadRejected { message } => {
                tracing::error!(%message, "Lead sink failed");
                ApiError::internal("Could not record the sale")
            }
            ClientError::AssistantUnavailable { message } => {
                tracing::error!(%message, "Assistant backend failed");
                ApiError::internal("Assistant unavailable")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
