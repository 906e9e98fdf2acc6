//! # Line Items
//!
//! One row of the invoice / purchase-order item table and the recompute that
//! runs every time one of its fields changes.
//!
//! ## Recompute Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field edit (quantity / unit price / tax rate / product)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. actual_unit_price   = round2(unit_price / (1 + tax/100))           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. tax_amount_per_unit                                                │
//! │       Invoice:        round2((actual + shipping_cost) × tax/100)       │
//! │       Purchase order: round2(actual × tax/100)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. line_total          = round2(quantity × unit_price)                │
//! │                                                                         │
//! │  NOTE: line_total uses the tax-INCLUSIVE price, while the document     │
//! │  subtotal uses the tax-EXCLUSIVE one. The screens have always shown    │
//! │  it this way, so the two columns do not reconcile line by line.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::PricingError;
use crate::money::{parse_decimal_lenient, Money};
use crate::types::{Catalog, DocumentKind, TaxRateTable};

// =============================================================================
// Line Item
// =============================================================================

/// A line on an invoice or purchase order.
///
/// The last three fields are derived; they are refreshed by
/// [`update_line`] and [`LineItem::recompute`] and never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Client-side id (UUID v4), stable while the row exists.
    pub id: String,

    /// Catalog product this line was picked from.
    #[serde(default)]
    pub product_id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// `None` while the quantity box is blank. Counts as 0 in every sum.
    #[serde(default)]
    #[ts(type = "string | null")]
    pub quantity: Option<Decimal>,

    /// Tax-inclusive price per unit, as typed.
    #[serde(default)]
    pub unit_price: Money,

    /// 0 or one of the document's configured rates.
    #[serde(default)]
    #[ts(type = "string")]
    pub tax_rate_percent: Decimal,

    /// Tax-exclusive unit price.
    #[serde(default)]
    pub actual_unit_price: Money,

    #[serde(default)]
    pub tax_amount_per_unit: Money,

    /// `quantity × unit_price` (tax-inclusive basis).
    #[serde(default)]
    pub line_total: Money,
}

impl LineItem {
    /// Quantity with blank read as 0.
    #[inline]
    pub fn quantity_or_zero(&self) -> Decimal {
        self.quantity.unwrap_or(Decimal::ZERO)
    }

    /// Refreshes the derived fields from the current inputs.
    ///
    /// `shipping_cost` only matters for invoices.
    pub fn recompute(&mut self, kind: DocumentKind, shipping_cost: Money) {
        let tax = self.tax_rate_percent;

        self.actual_unit_price = self.unit_price.divide_out_tax(tax);

        self.tax_amount_per_unit = match kind {
            DocumentKind::Invoice => (self.actual_unit_price + shipping_cost)
                .percent(tax)
                .round2(),
            DocumentKind::PurchaseOrder => self.actual_unit_price.percent(tax).round2(),
        };

        self.line_total = self.unit_price.times(self.quantity_or_zero()).round2();
    }
}

// =============================================================================
// Edits
// =============================================================================

/// A single field change coming from the item table.
///
/// Numeric values arrive as the raw text of the input box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum LineEdit {
    Quantity(String),
    UnitPrice(String),
    TaxRate(String),
    Name(String),
    Description(String),
    /// Product picker; an empty id clears the selection.
    Product(String),
}

/// Everything an edit needs besides the line itself.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    pub kind: DocumentKind,
    pub shipping_cost: Money,
    pub tax_rates: &'a TaxRateTable,
    pub catalog: &'a Catalog,
}

impl<'a> PricingContext<'a> {
    /// Context with no shipping cost.
    pub fn new(kind: DocumentKind, tax_rates: &'a TaxRateTable, catalog: &'a Catalog) -> Self {
        PricingContext {
            kind,
            shipping_cost: Money::zero(),
            tax_rates,
            catalog,
        }
    }

    pub fn with_shipping(mut self, shipping_cost: Money) -> Self {
        self.shipping_cost = shipping_cost;
        self
    }
}

/// Result of [`update_line`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineUpdate {
    pub line: LineItem,
    /// Soft diagnostics: the edit was applied with a fallback.
    pub warnings: Vec<PricingError>,
}

// =============================================================================
// Operations
// =============================================================================

/// Creates an empty row: no quantity, zero price, the default tax rate.
///
/// ## Example
/// ```rust
/// use quire_core::line::new_line;
/// use quire_core::types::TaxRateTable;
///
/// let line = new_line(&TaxRateTable::default());
/// assert!(line.quantity.is_none());
/// assert!(line.tax_rate_percent.is_zero());
/// ```
pub fn new_line(tax_rates: &TaxRateTable) -> LineItem {
    LineItem {
        id: Uuid::new_v4().to_string(),
        product_id: None,
        name: String::new(),
        description: String::new(),
        quantity: None,
        unit_price: Money::zero(),
        tax_rate_percent: tax_rates.default_percent(),
        actual_unit_price: Money::zero(),
        tax_amount_per_unit: Money::zero(),
        line_total: Money::zero(),
    }
}

/// Applies one field edit and refreshes the derived fields.
///
/// Never fails. Unusable numbers become 0; an unknown tax rate falls back
/// to 0 and an unknown product leaves the line as it was, both reported in
/// [`LineUpdate::warnings`].
///
/// Picking a product applies the default tax rate when the line's rate is
/// 0. A line has no separate "rate chosen" flag, so a deliberate 0 picked
/// before the product is replaced as well; picking 0 afterwards keeps it.
///
/// ## User Workflow
/// ```text
/// User types "2" in Qty
///      │
///      ▼
/// update_line(line, Quantity("2"), ctx) ← THIS FUNCTION
///      │
///      ▼
/// Row shows new Total; document totals are recomputed from the new line
/// ```
pub fn update_line(mut line: LineItem, edit: LineEdit, ctx: &PricingContext<'_>) -> LineUpdate {
    let mut warnings = Vec::new();

    match edit {
        LineEdit::Quantity(raw) => {
            line.quantity = if raw.trim().is_empty() {
                None
            } else {
                Some(parse_decimal_lenient(&raw).max(Decimal::ZERO))
            };
        }
        LineEdit::UnitPrice(raw) => {
            line.unit_price = Money::parse_lenient(&raw);
        }
        LineEdit::TaxRate(raw) => {
            let requested = parse_decimal_lenient(&raw);
            line.tax_rate_percent = ctx
                .tax_rates
                .resolve_percent(requested)
                .unwrap_or_else(|err| {
                    warnings.push(err);
                    Decimal::ZERO
                });
        }
        LineEdit::Name(name) => line.name = name,
        LineEdit::Description(text) => line.description = text,
        LineEdit::Product(product_id) => {
            let product_id = product_id.trim();
            if product_id.is_empty() {
                line.product_id = None;
            } else if let Some(product) = ctx.catalog.find(product_id) {
                line.product_id = Some(product.id.clone());
                line.name = product.name.clone();
                line.description = product.description.clone();
                line.unit_price = product.unit_price;
                if line.tax_rate_percent.is_zero() {
                    line.tax_rate_percent = ctx.tax_rates.default_percent();
                }
            } else {
                warnings.push(PricingError::UnknownProduct(product_id.to_string()));
            }
        }
    }

    line.recompute(ctx.kind, ctx.shipping_cost);
    LineUpdate { line, warnings }
}

// =============================================================================
// Unit Tests
// =============================================================================
