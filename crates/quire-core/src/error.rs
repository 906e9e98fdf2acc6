//! # Error Types
//!
//! Domain-specific error types for quire-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quire-core errors (this file)                                         │
//! │  ├── PricingError     - Line/draft operation failures and diagnostics  │
//! │  └── ValidationError  - Submission gate failures                       │
//! │                                                                         │
//! │  quire-cli errors (app crate)                                          │
//! │  └── CliError         - What the caller sees ({ code, message })       │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → CliError → UI                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing math itself never fails. Errors only come from operations
//! that address something by id (a line, a product) and from submission
//! validation.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors and soft diagnostics produced by the pricing engine.
///
/// `UnknownTaxRate` and `UnknownProduct` are returned as warnings inside a
/// [`crate::line::LineUpdate`]; the edit still completes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// No line with this id in the draft.
    #[error("Line not found: {0}")]
    LineNotFound(String),

    /// A tax percentage that is neither zero nor one of the document's rates.
    ///
    /// ## When This Occurs
    /// - Stale rate left on a line after the company's tax table changed
    /// - Hand-edited document file
    ///
    /// The line falls back to 0% ("no tax").
    #[error("Tax rate {percent}% is not configured for this document")]
    UnknownTaxRate { percent: Decimal },

    /// Product selection referenced an id missing from the catalog.
    #[error("Product not found in catalog: {0}")]
    UnknownProduct(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Submission validation errors.
///
/// Each variant renders to the single human-readable message the form shows
/// before refusing to submit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// No line references a catalog product.
    #[error("Add at least one item with a valid product")]
    NoValidLine,

    /// A line with a product is missing quantity or price.
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = PricingError::UnknownTaxRate { percent: dec!(7.5) };
        assert_eq!(
            err.to_string(),
            "Tax rate 7.5% is not configured for this document"
        );

        let err = PricingError::LineNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Line not found: abc");
    }

    #[test]
    fn test_line_error_message_includes_position() {
        let err = ValidationError::Line {
            line: 2,
            source: Box::new(ValidationError::Required {
                field: "quantity".to_string(),
            }),
        };
        assert_eq!(err.to_string(), "Line 2: quantity is required");
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let pricing_err: PricingError = ValidationError::NoValidLine.into();
        assert!(matches!(pricing_err, PricingError::Validation(_)));
    }
}
