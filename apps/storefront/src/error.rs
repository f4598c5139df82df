//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Shopper types "add fietsbel 1000"                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  →  Result<T, ApiError>                        │  │
//! │  │         │                                                        │  │
//! │  │  Form input rejected? ── FieldErrors ─────────────┐              │  │
//! │  │         │                                         │              │  │
//! │  │  Catalog lookup failed? ── CoreError / DbError ───┤              │  │
//! │  │         │                                         ▼              │  │
//! │  │  Success ──► CartView                   ApiError { code,        │  │
//! │  │                                           message, fields }     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Cart mutations never fail: invalid requests are no-ops.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages are Dutch; they are shown to the shopper as-is.

use etalage_core::{CoreError, FieldErrors};
use etalage_db::DbError;
use serde::Serialize;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Controleer de ingevulde gegevens",
///   "fields": [{ "field": "quantity", "message": "Aantal mag maximaal 999 zijn" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages when a form was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or page not found
    NotFound,

    /// Form input rejected
    ValidationError,

    /// Catalog could not be read
    CatalogUnavailable,

    /// Unrecognized session command
    UnknownCommand,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a product-not-found error.
    pub fn product_not_found(reference: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("Product niet gevonden: {}", reference),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Text shown in the terminal session.
    pub fn render_text(&self) -> String {
        let mut out = self.message.clone();
        if let Some(fields) = &self.fields {
            for error in fields.iter() {
                out.push_str(&format!("\n  - {}: {}", error.field, error.message));
            }
        }
        out
    }
}

/// Converts rejected forms to API errors.
impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: "Controleer de ingevulde gegevens".to_string(),
            fields: Some(errors),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::from(CoreError::from(err))
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::product_not_found(&id),
            CoreError::CatalogUnavailable(reason) => {
                // Log the actual error but return a generic message
                tracing::error!(%reason, "Catalog unavailable");
                ApiError::new(
                    ErrorCode::CatalogUnavailable,
                    "Het assortiment is op dit moment niet beschikbaar",
                )
            }
            CoreError::Validation(e) => {
                let mut fields = FieldErrors::new();
                fields.push(e.field(), e.to_string());
                ApiError::from(fields)
            }
            CoreError::Form(fields) => ApiError::from(fields),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
