//! # Document Totals
//!
//! The summary block under the item table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Subtotal             round2(Σ qty × actual_unit_price)                │
//! │  Tax                  round2(Σ qty × tax_amount_per_unit)              │
//! │  Shipping             shipping_cost                                     │
//! │  Shipping tax         round2(shipping_cost × shipping_tax/100)         │
//! │  Shipping w/ tax      round2(shipping_cost + shipping tax)             │
//! │  Discount             round2(subtotal × value/100) | round2(value)     │
//! │  ───────────────────────────────────────────────────────────────────   │
//! │  TOTAL                round2(subtotal + shipping w/ tax + tax − disc)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::line::LineItem;
use crate::money::{round2, Money};
use crate::types::{DiscountType, DocumentCharges};

/// Totals for one document, all rounded to 2dp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    pub subtotal: Money,
    pub total_tax: Money,
    pub discount_amount: Money,
    pub shipping_tax_amount: Money,
    pub total_shipping_with_tax: Money,
    pub total: Money,
}

/// Computes the document totals from the current lines and charges.
///
/// Pure: always succeeds and never touches its inputs. Sums are taken over
/// the unrounded products and rounded once per total, while each line's
/// per-unit amounts were already rounded when the line was edited.
///
/// ## Example
/// ```rust
/// use quire_core::totals::compute_document_totals;
/// use quire_core::types::DocumentCharges;
///
/// let totals = compute_document_totals(&[], &DocumentCharges::default());
/// assert!(totals.total.is_zero());
/// ```
pub fn compute_document_totals(lines: &[LineItem], charges: &DocumentCharges) -> DocumentTotals {
    let shipping_cost = charges.shipping_cost;
    let shipping_tax_amount = shipping_cost
        .percent(charges.shipping_tax_rate_percent)
        .round2();
    let total_shipping_with_tax = (shipping_cost + shipping_tax_amount).round2();

    let subtotal = lines
        .iter()
        .map(|l| l.actual_unit_price.times(l.quantity_or_zero()))
        .sum::<Money>()
        .round2();

    let total_tax = lines
        .iter()
        .map(|l| l.tax_amount_per_unit.times(l.quantity_or_zero()))
        .sum::<Money>()
        .round2();

    let discount_amount = discount_amount(subtotal, charges.discount_type, charges.discount_value);

    let total = (subtotal + total_shipping_with_tax + total_tax - discount_amount).round2();

    DocumentTotals {
        subtotal,
        total_tax,
        discount_amount,
        shipping_tax_amount,
        total_shipping_with_tax,
        total,
    }
}

/// Discount for a given subtotal.
///
/// A percentage is taken of the tax-exclusive subtotal; a fixed value is
/// used as-is. Neither is capped, so a large discount can make the total
/// negative; the submission check rejects that.
pub fn discount_amount(subtotal: Money, discount_type: DiscountType, value: Decimal) -> Money {
    match discount_type {
        DiscountType::Percentage => subtotal.percent(value).round2(),
        DiscountType::Fixed => Money::new(round2(value)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
