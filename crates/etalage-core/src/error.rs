//! # Error Types
//!
//! Domain-specific error types for etalage-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  etalage-core errors (this file)                                       │
//! │  ├── CoreError        - Catalog lookups and wrapped validation         │
//! │  ├── ValidationError  - A single field failing a single rule           │
//! │  └── FieldErrors      - Every failing field of a submitted form        │
//! │                                                                         │
//! │  etalage-db errors (separate crate)                                    │
//! │  └── DbError          - Catalog store failures                         │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the shopper sees                          │
//! │                                                                         │
//! │  Flow: FieldErrors / CoreError / DbError → ApiError → Shopper          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations never appear here: an invalid cart mutation is a no-op.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised around the cart, never by it.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog has no product with this id or slug.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The catalog could not be read.
    ///
    /// ## When This Occurs
    /// - The catalog database is missing or locked
    /// - A row in the catalog cannot be decoded into a [`crate::Product`]
    #[error("Product catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A whole form failed validation.
    #[error("Form validation failed: {0}")]
    Form(#[from] FieldErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single input value failing a single rule.
///
/// Used by the scalar validators (`validate_product_id`, …). Schemas collect
/// these per field into [`FieldErrors`] with their Dutch messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. not a number, not an email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// One failing field of a form, with the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every failing field of a submitted form, in schema order.
///
/// ## Serialization
/// ```json
/// [
///   { "field": "email", "message": "Vul een geldig e-mailadres in" },
///   { "field": "password", "message": "Wachtwoord moet minimaal 8 tekens bevatten" }
/// ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(Vec::new())
    }

    /// Records a failing field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message for a field, if that field failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Field names in the order they were reported.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    /// Converts to `Err(self)` unless nothing failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<ValidationError> for FieldErrors {
    fn from(err: ValidationError) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(err.field().to_string(), err.to_string());
        errors
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "query must be at most 100 characters");
        assert_eq!(err.field(), "query");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_field_errors_keep_order() {
        let mut errors = FieldErrors::new();
        errors.push("email", "Vul een geldig e-mailadres in");
        errors.push("password", "Vul je wachtwoord in");

        assert_eq!(errors.fields(), vec!["email", "password"]);
        assert_eq!(errors.get("password"), Some("Vul je wachtwoord in"));
        assert_eq!(errors.get("name"), None);
        assert_eq!(
            errors.to_string(),
            "email: Vul een geldig e-mailadres in; password: Vul je wachtwoord in"
        );
    }

    #[test]
    fn test_field_errors_serialize_as_list() {
        let mut errors = FieldErrors::new();
        errors.push("quantity", "Aantal moet minimaal 1 zijn");

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(
            json,
            r#"[{"field":"quantity","message":"Aantal moet minimaal 1 zijn"}]"#
        );
    }

    #[test]
    fn test_empty_field_errors_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
