//! # quire-core: Pure Pricing Logic for Quire ERP
//!
//! This crate is the pricing engine behind the invoice and purchase-order
//! screens. It contains the line-item and document-total math as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quire ERP Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser UI                                   │   │
//! │  │    Invoice modal ──► Purchase order modal ──► PDF reports       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ field edits / snapshots               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    quire-cli (editor shell)                     │   │
//! │  │    EditorContext, config, logging, replay                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quire-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   line    │  │  totals   │  │ validation│  │   │
//! │  │   │   Money   │  │ LineItem  │  │ Document  │  │ submission│  │   │
//! │  │   │  round2   │  │ LineEdit  │  │  Totals   │  │   gate    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Reference data and document-level inputs (tax rates, catalog, charges)
//! - [`money`] - Money type, `round2`, lenient form-input parsing
//! - [`line`] - Line items and the per-field recompute
//! - [`totals`] - Document totals (subtotal, tax, discount, shipping)
//! - [`draft`] - An editable document: ordered lines plus charges
//! - [`validation`] - Submission rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, recomputed on every edit
//! 2. **Round Every Step**: each derived amount is rounded to 2dp where it is produced
//! 3. **Never Reject Typing**: bad numeric input becomes 0, it is not an error
//! 4. **Explicit Errors**: lookups by id return typed errors, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use quire_core::line::{new_line, update_line, LineEdit, PricingContext};
//! use quire_core::totals::compute_document_totals;
//! use quire_core::types::{Catalog, DocumentCharges, DocumentKind, TaxRateTable};
//!
//! let rates = TaxRateTable::default();
//! let catalog = Catalog::default();
//! let ctx = PricingContext::new(DocumentKind::Invoice, &rates, &catalog);
//!
//! let line = new_line(&rates);
//! let line = update_line(line, LineEdit::Quantity("1".into()), &ctx).line;
//! let line = update_line(line, LineEdit::UnitPrice("118".into()), &ctx).line;
//!
//! let totals = compute_document_totals(&[line], &DocumentCharges::default());
//! assert_eq!(totals.total.to_string(), "118.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod line;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{DocumentDraft, DraftSnapshot};
pub use error::{PricingError, PricingResult, ValidationError};
pub use line::{new_line, update_line, LineEdit, LineItem, LineUpdate, PricingContext};
pub use money::{round2, Money};
pub use totals::{compute_document_totals, DocumentTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

use rust_decimal::Decimal;

/// Largest magnitude accepted from a numeric form field (10^12).
///
/// ## Business Reason
/// Keeps `quantity × price` far inside Decimal's 28-digit range. Anything
/// larger is a typo and is coerced to 0 like any other unusable input.
pub const MAX_INPUT_MAGNITUDE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Highest tax percentage a rate may carry.
pub const MAX_TAX_PERCENT: Decimal = Decimal::ONE_HUNDRED;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_input_magnitude_is_one_trillion() {
        assert_eq!(MAX_INPUT_MAGNITUDE, Decimal::from(1_000_000_000_000_i64));
    }
}
