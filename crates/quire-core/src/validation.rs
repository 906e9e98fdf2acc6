//! # Validation Module
//!
//! The checks a document must pass before it is sent to the API.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  While typing: NOTHING is rejected                                     │
//! │  └── bad numbers become 0, totals keep updating                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  On "Save": THIS MODULE                                                │
//! │  ├── counterparty chosen                                               │
//! │  ├── at least one line with a catalog product                          │
//! │  ├── those lines have quantity and price                               │
//! │  └── total is not negative                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  REST API: authoritative checks                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failure is returned; the form shows its message and submits
//! nothing.
//!
//! ## Usage
//! ```rust
//! use quire_core::validation::validate_tax_percent;
//! use rust_decimal::Decimal;
//!
//! assert!(validate_tax_percent(Decimal::from(18)).is_ok());
//! assert!(validate_tax_percent(Decimal::from(101)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::draft::DocumentDraft;
use crate::error::ValidationError;
use crate::{MAX_INPUT_MAGNITUDE, MAX_TAX_PERCENT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Submission
// =============================================================================

/// Validates a draft for submission.
///
/// ## Rules
/// - `counterparty_id` (customer or vendor) must be present
/// - At least one line must reference a product in the catalog
/// - Every line with a product needs quantity > 0 and unit price > 0
/// - The total must not be negative
///
/// Lines without a product are ignored; the UI drops them on save.
pub fn validate_submission(
    draft: &DocumentDraft,
    counterparty_id: Option<&str>,
) -> ValidationResult<()> {
    let counterparty = counterparty_id.map(str::trim).unwrap_or_default();
    if counterparty.is_empty() {
        return Err(ValidationError::Required {
            field: draft.kind().counterparty_label().to_string(),
        });
    }

    let catalog = draft.catalog();
    let mut valid_lines = 0;

    for (index, line) in draft.lines().iter().enumerate() {
        let Some(product_id) = line.product_id.as_deref() else {
            continue;
        };
        if !catalog.contains(product_id) {
            continue;
        }

        let line_no = index + 1;
        match line.quantity {
            None => return Err(line_error(line_no, required("quantity"))),
            Some(q) if q <= Decimal::ZERO => {
                return Err(line_error(line_no, must_be_positive("quantity")))
            }
            Some(_) => {}
        }
        if !line.unit_price.is_positive() {
            return Err(line_error(line_no, must_be_positive("unit price")));
        }

        valid_lines += 1;
    }

    if valid_lines == 0 {
        return Err(ValidationError::NoValidLine);
    }

    if draft.totals().total.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "total".to_string(),
            min: Decimal::ZERO,
            max: Decimal::MAX,
        });
    }

    Ok(())
}

fn line_error(line: usize, source: ValidationError) -> ValidationError {
    ValidationError::Line {
        line,
        source: Box::new(source),
    }
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn must_be_positive(field: &str) -> ValidationError {
    ValidationError::MustBePositive {
        field: field.to_string(),
    }
}

// =============================================================================
// Reference Data
// =============================================================================

/// Validates a tax percentage.
///
/// ## Rules
/// - Between 0 and 100 inclusive
pub fn validate_tax_percent(percent: Decimal) -> ValidationResult<()> {
    validate_percent("tax_rate", percent)
}

/// Validates any percentage field against [0, 100].
pub fn validate_percent(field: &str, percent: Decimal) -> ValidationResult<()> {
    validate_range(field, percent, Decimal::ZERO, MAX_TAX_PERCENT)
}

/// Validates a number that reached the engine without going through the
/// lenient form parser, e.g. from a saved document.
///
/// ## Rules
/// - Magnitude at most [`MAX_INPUT_MAGNITUDE`]
pub fn validate_input_magnitude(field: &str, value: Decimal) -> ValidationResult<()> {
    validate_range(field, value, -MAX_INPUT_MAGNITUDE, MAX_INPUT_MAGNITUDE)
}

fn validate_range(field: &str, value: Decimal, min: Decimal, max: Decimal) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineEdit;
    use crate::money::Money;
    use crate::types::{
        Catalog, CatalogProduct, DiscountType, DocumentCharges, DocumentKind, TaxRate, TaxRateTable,
    };
    use rust_decimal_macros::dec;

    fn draft() -> DocumentDraft {
        let rates = TaxRateTable::new(vec![TaxRate {
            id: "gst".to_string(),
            name: "GST".to_string(),
            rate_percent: dec!(18),
            is_default: true,
        }]);
        let catalog = Catalog::new(vec![CatalogProduct {
            id: "lamp".to_string(),
            name: "Lamp".to_string(),
            description: String::new(),
            unit_price: Money::new(dec!(59)),
        }]);
        DocumentDraft::new(DocumentKind::Invoice, rates, catalog)
    }

    fn draft_with_product_line(qty: &str) -> DocumentDraft {
        let mut d = draft();
        let id = d.add_line();
        d.edit_line(&id, LineEdit::Product("lamp".into())).unwrap();
        d.edit_line(&id, LineEdit::Quantity(qty.into())).unwrap();
        d
    }

    #[test]
    fn test_valid_submission() {
        let d = draft_with_product_line("2");
        assert!(validate_submission(&d, Some("cust-1")).is_ok());
    }

    #[test]
    fn test_counterparty_required() {
        let d = draft_with_product_line("2");
        let err = validate_submission(&d, None).unwrap_err();
        assert_eq!(err.to_string(), "customer is required");

        assert!(validate_submission(&d, Some("   ")).is_err());
    }

    #[test]
    fn test_needs_a_product_line() {
        let mut d = draft();
        let id = d.add_line();
        d.edit_line(&id, LineEdit::UnitPrice("10".into())).unwrap();
        d.edit_line(&id, LineEdit::Quantity("1".into())).unwrap();

        assert_eq!(
            validate_submission(&d, Some("cust-1")),
            Err(ValidationError::NoValidLine)
        );
    }

    #[test]
    fn test_product_line_needs_quantity() {
        let d = draft_with_product_line("");
        let err = validate_submission(&d, Some("cust-1")).unwrap_err();
        assert_eq!(err.to_string(), "Line 1: quantity is required");

        let d = draft_with_product_line("0");
        let err = validate_submission(&d, Some("cust-1")).unwrap_err();
        assert_eq!(err.to_string(), "Line 1: quantity must be positive");
    }

    #[test]
    fn test_product_line_needs_price() {
        let mut d = draft_with_product_line("1");
        let id = d.lines()[0].id.clone();
        d.edit_line(&id, LineEdit::UnitPrice("0".into())).unwrap();

        let err = validate_submission(&d, Some("cust-1")).unwrap_err();
        assert_eq!(err.to_string(), "Line 1: unit price must be positive");
    }

    #[test]
    fn test_negative_total_rejected() {
        let mut d = draft_with_product_line("1");
        d.set_charges(DocumentCharges {
            discount_type: DiscountType::Fixed,
            discount_value: dec!(500),
            ..DocumentCharges::default()
        });
        assert!(matches!(
            validate_submission(&d, Some("cust-1")),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_tax_percent() {
        assert!(validate_tax_percent(dec!(0)).is_ok());
        assert!(validate_tax_percent(dec!(18)).is_ok());
        assert!(validate_tax_percent(dec!(100)).is_ok());
        assert!(validate_tax_percent(dec!(100.01)).is_err());
        assert!(validate_tax_percent(dec!(-1)).is_err());
    }

    #[test]
    fn test_validate_input_magnitude() {
        assert!(validate_input_magnitude("quantity", dec!(1000000000000)).is_ok());
        assert!(validate_input_magnitude("quantity", dec!(-1000000000000)).is_ok());

        let err = validate_input_magnitude("quantity", dec!(1000000000000.01)).unwrap_err();
        assert!(err.to_string().starts_with("quantity must be between"));
    }

    #[test]
    fn test_validate_percent_names_the_field() {
        let err = validate_percent("shipping tax rate", dec!(500)).unwrap_err();
        assert_eq!(err.to_string(), "shipping tax rate must be between 0 and 100");
    }
}
