//! # Document Draft
//!
//! An invoice or purchase order while it is being edited: the ordered line
//! set, the document-level charges and the reference data the lines are
//! priced against.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action              Draft Method             State Change          │
//! │  ─────────              ────────────             ────────────          │
//! │                                                                         │
//! │  "Add item" ──────────► add_line() ────────────► lines.push(new_line)  │
//! │                                                                         │
//! │  Edit a cell ─────────► edit_line(id, edit) ───► lines[i] recomputed   │
//! │                                                                         │
//! │  Trash icon ──────────► remove_line(id) ───────► lines.retain(..)      │
//! │                                                                         │
//! │  Discount / shipping ─► set_charges(..) ───────► every line recomputed │
//! │                                                                         │
//! │  After each ──────────► snapshot() ────────────► lines + totals        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are never stored; [`DocumentDraft::totals`] derives them from the
//! current lines every time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::line::{new_line, update_line, LineEdit, LineItem, PricingContext};
use crate::money::Money;
use crate::totals::{compute_document_totals, DocumentTotals};
use crate::types::{Catalog, DocumentCharges, DocumentKind, TaxRateTable};
use crate::validation::{validate_input_magnitude, validate_tax_percent};

/// A document being edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    #[serde(default)]
    kind: DocumentKind,

    #[serde(default)]
    lines: Vec<LineItem>,

    #[serde(default)]
    charges: DocumentCharges,

    #[serde(default)]
    tax_rates: TaxRateTable,

    #[serde(default)]
    catalog: Catalog,

    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

/// What the UI re-renders after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub kind: DocumentKind,
    pub lines: Vec<LineItem>,
    pub charges: DocumentCharges,
    pub totals: DocumentTotals,
}

impl DocumentDraft {
    /// Creates an empty draft with no lines and zero charges.
    pub fn new(kind: DocumentKind, tax_rates: TaxRateTable, catalog: Catalog) -> Self {
        let now = Utc::now();
        DocumentDraft {
            kind,
            lines: Vec::new(),
            charges: DocumentCharges::default(),
            tax_rates,
            catalog,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn charges(&self) -> &DocumentCharges {
        &self.charges
    }

    pub fn tax_rates(&self) -> &TaxRateTable {
        &self.tax_rates
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Appends an empty line and returns its id.
    pub fn add_line(&mut self) -> String {
        let mut line = new_line(&self.tax_rates);
        line.recompute(self.kind, self.charges.shipping_cost);
        let id = line.id.clone();
        self.lines.push(line);
        self.touch();
        id
    }

    /// Removes a line. Returns `false` if it was not there; that is not an error.
    pub fn remove_line(&mut self, line_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != line_id);

        let removed = self.lines.len() != initial_len;
        if removed {
            self.touch();
        }
        removed
    }

    /// Applies a field edit to one line.
    ///
    /// ## Returns
    /// - `Ok(warnings)` with any soft diagnostics from the edit
    /// - `Err(PricingError::LineNotFound)` if no line has this id
    pub fn edit_line(&mut self, line_id: &str, edit: LineEdit) -> PricingResult<Vec<PricingError>> {
        let ctx = PricingContext {
            kind: self.kind,
            shipping_cost: self.charges.shipping_cost,
            tax_rates: &self.tax_rates,
            catalog: &self.catalog,
        };

        let slot = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| PricingError::LineNotFound(line_id.to_string()))?;

        let update = update_line(slot.clone(), edit, &ctx);
        *slot = update.line;
        self.touch();
        Ok(update.warnings)
    }

    /// Replaces the discount and shipping inputs.
    ///
    /// Every line is recomputed because an invoice's per-unit tax depends
    /// on the shipping cost. Unusable charges are reset to 0 and returned
    /// as warnings.
    pub fn set_charges(&mut self, charges: DocumentCharges) -> Vec<PricingError> {
        self.charges = charges;
        let warnings = self.charges.sanitize();
        for line in &mut self.lines {
            line.recompute(self.kind, self.charges.shipping_cost);
        }
        self.touch();
        warnings
    }

    /// Brings a loaded draft back inside the values the form could have
    /// produced, then recomputes all derived fields.
    ///
    /// ## Checks
    /// ```text
    /// tax table    rates outside [0, 100]          → dropped
    /// catalog      prices beyond the input limit   → 0
    /// charges      see DocumentCharges::sanitize   → 0
    /// lines        quantity / price beyond limit   → 0
    ///              negative quantity               → 0
    ///              rate not in the table           → 0
    /// ```
    ///
    /// Every reset is reported as a warning. Used after loading a draft
    /// from a file, whose numbers never went through the lenient parser.
    pub fn normalize(&mut self) -> Vec<PricingError> {
        let mut warnings = Vec::new();

        let mut rates = Vec::with_capacity(self.tax_rates.rates().len());
        for rate in self.tax_rates.rates() {
            match validate_tax_percent(rate.rate_percent) {
                Ok(()) => rates.push(rate.clone()),
                Err(err) => warnings.push(err.into()),
            }
        }
        self.tax_rates = TaxRateTable::new(rates);

        let mut products = self.catalog.products().to_vec();
        for product in &mut products {
            if let Err(err) = validate_input_magnitude("unit price", product.unit_price.amount()) {
                product.unit_price = Money::zero();
                warnings.push(err.into());
            }
        }
        self.catalog = Catalog::new(products);

        warnings.extend(self.charges.sanitize());

        for line in &mut self.lines {
            if let Some(quantity) = line.quantity {
                if let Err(err) = validate_input_magnitude("quantity", quantity) {
                    line.quantity = Some(Decimal::ZERO);
                    warnings.push(err.into());
                } else if quantity.is_sign_negative() {
                    line.quantity = Some(Decimal::ZERO);
                }
            }
            if let Err(err) = validate_input_magnitude("unit price", line.unit_price.amount()) {
                line.unit_price = Money::zero();
                warnings.push(err.into());
            }
            if let Err(err) = self.tax_rates.resolve_percent(line.tax_rate_percent) {
                warnings.push(err);
                line.tax_rate_percent = Decimal::ZERO;
            }
            line.recompute(self.kind, self.charges.shipping_cost);
        }
        warnings
    }

    /// Current totals, derived from the lines and charges.
    pub fn totals(&self) -> DocumentTotals {
        compute_document_totals(&self.lines, &self.charges)
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            kind: self.kind,
            lines: self.lines.clone(),
            charges: self.charges.clone(),
            totals: self.totals(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogProduct, DiscountType, TaxRate};
    use rust_decimal_macros::dec;

    fn draft(kind: DocumentKind) -> DocumentDraft {
        let rates = TaxRateTable::new(vec![TaxRate {
            id: "vat18".to_string(),
            name: "VAT 18%".to_string(),
            rate_percent: dec!(18),
            is_default: true,
        }]);
        let catalog = Catalog::new(vec![CatalogProduct {
            id: "desk".to_string(),
            name: "Desk".to_string(),
            description: "Oak".to_string(),
            unit_price: Money::new(dec!(118)),
        }]);
        DocumentDraft::new(kind, rates, catalog)
    }

    #[test]
    fn test_add_edit_and_total() {
        let mut d = draft(DocumentKind::Invoice);
        let id = d.add_line();
        assert_eq!(d.lines().len(), 1);

        d.edit_line(&id, LineEdit::Product("desk".into())).unwrap();
        d.edit_line(&id, LineEdit::Quantity("2".into())).unwrap();

        let totals = d.totals();
        assert_eq!(totals.subtotal, Money::new(dec!(200)));
        assert_eq!(totals.total_tax, Money::new(dec!(36)));
        assert_eq!(totals.total, Money::new(dec!(236)));
        assert_eq!(d.line(&id).unwrap().line_total, Money::new(dec!(236)));
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut d = draft(DocumentKind::PurchaseOrder);
        let id = d.add_line();

        assert!(!d.remove_line("not-there"));
        assert_eq!(d.lines().len(), 1);

        assert!(d.remove_line(&id));
        assert!(!d.remove_line(&id));
        assert!(d.lines().is_empty());
    }

    #[test]
    fn test_edit_missing_line_errors() {
        let mut d = draft(DocumentKind::Invoice);
        let err = d.edit_line("nope", LineEdit::Quantity("1".into())).unwrap_err();
        assert_eq!(err, PricingError::LineNotFound("nope".to_string()));
    }

    #[test]
    fn test_shipping_change_recomputes_invoice_lines() {
        let mut d = draft(DocumentKind::Invoice);
        let id = d.add_line();
        d.edit_line(&id, LineEdit::Product("desk".into())).unwrap();
        d.edit_line(&id, LineEdit::Quantity("1".into())).unwrap();
        assert_eq!(d.line(&id).unwrap().tax_amount_per_unit, Money::new(dec!(18)));

        d.set_charges(DocumentCharges {
            shipping_cost: Money::new(dec!(50)),
            ..DocumentCharges::default()
        });
        // (100 + 50) × 18%
        assert_eq!(d.line(&id).unwrap().tax_amount_per_unit, Money::new(dec!(27)));
        // 100 + 50 + 27
        assert_eq!(d.totals().total, Money::new(dec!(177)));
    }

    #[test]
    fn test_shipping_change_leaves_order_tax() {
        let mut d = draft(DocumentKind::PurchaseOrder);
        let id = d.add_line();
        d.edit_line(&id, LineEdit::Product("desk".into())).unwrap();
        d.set_charges(DocumentCharges {
            shipping_cost: Money::new(dec!(50)),
            discount_type: DiscountType::Fixed,
            ..DocumentCharges::default()
        });
        assert_eq!(d.line(&id).unwrap().tax_amount_per_unit, Money::new(dec!(18)));
    }

    #[test]
    fn test_normalize_resets_unknown_rates() {
        let json = r#"{
            "kind": "invoice",
            "taxRates": [{ "id": "vat18", "name": "VAT", "ratePercent": "18" }],
            "lines": [
                { "id": "a", "quantity": "1", "unitPrice": "118", "taxRatePercent": "18" },
                { "id": "b", "quantity": "1", "unitPrice": "100", "taxRatePercent": "7" }
            ]
        }"#;
        let mut d: DocumentDraft = serde_json::from_str(json).unwrap();
        let warnings = d.normalize();

        assert_eq!(warnings.len(), 1);
        assert!(d.line("b").unwrap().tax_rate_percent.is_zero());
        assert_eq!(d.line("a").unwrap().actual_unit_price, Money::new(dec!(100)));
        assert_eq!(d.totals().total, Money::new(dec!(218)));
    }

    #[test]
    fn test_normalize_resets_oversize_numbers() {
        let json = r#"{
            "catalog": [{ "id": "big", "name": "Big", "unitPrice": "79228162514264337593543950335" }],
            "charges": { "shippingCost": "99999999999999999999", "discountValue": "10" },
            "lines": [
                { "id": "a", "quantity": "79228162514264337593543950335", "unitPrice": "2", "taxRatePercent": "0" },
                { "id": "b", "quantity": "3", "unitPrice": "-79228162514264337593543950335", "taxRatePercent": "0" }
            ]
        }"#;
        let mut d: DocumentDraft = serde_json::from_str(json).unwrap();
        let warnings = d.normalize();

        assert_eq!(warnings.len(), 4);
        assert_eq!(d.line("a").unwrap().quantity, Some(Decimal::ZERO));
        assert!(d.line("b").unwrap().unit_price.is_zero());
        assert!(d.catalog().find("big").unwrap().unit_price.is_zero());
        assert!(d.charges().shipping_cost.is_zero());
        assert_eq!(d.totals(), DocumentTotals::default());
    }

    #[test]
    fn test_normalize_drops_out_of_range_rates() {
        let json = r#"{
            "taxRates": [
                { "id": "silly", "name": "Silly", "ratePercent": "250", "isDefault": true },
                { "id": "gst", "name": "GST", "ratePercent": "18" }
            ],
            "charges": { "shippingCost": "10", "shippingTaxRatePercent": "500" },
            "lines": [{ "id": "a", "quantity": "1", "unitPrice": "100", "taxRatePercent": "250" }]
        }"#;
        let mut d: DocumentDraft = serde_json::from_str(json).unwrap();
        let warnings = d.normalize();

        // the 250% rate, the 500% shipping tax, the line left on the dropped rate
        assert_eq!(warnings.len(), 3);
        assert_eq!(d.tax_rates().rates().len(), 1);
        assert!(d.charges().shipping_tax_rate_percent.is_zero());

        let line = d.line("a").unwrap();
        assert!(line.tax_rate_percent.is_zero());
        assert!(line.tax_amount_per_unit.is_zero());

        let totals = d.totals();
        assert!(totals.shipping_tax_amount.is_zero());
        assert_eq!(totals.total, Money::new(dec!(110)));
    }

    #[test]
    fn test_set_charges_reports_bad_shipping_rate() {
        let mut d = draft(DocumentKind::Invoice);
        let warnings = d.set_charges(DocumentCharges::parse(DiscountType::Fixed, "0", "50", "150"));

        assert_eq!(warnings.len(), 1);
        assert!(d.charges().shipping_tax_rate_percent.is_zero());
        assert_eq!(d.totals().total_shipping_with_tax, Money::new(dec!(50)));
    }

    #[test]
    fn test_snapshot_matches_totals() {
        let mut d = draft(DocumentKind::Invoice);
        let id = d.add_line();
        d.edit_line(&id, LineEdit::UnitPrice("59".into())).unwrap();
        d.edit_line(&id, LineEdit::Quantity("4".into())).unwrap();

        let snap = d.snapshot();
        assert_eq!(snap.lines.len(), 1);
        assert_eq!(snap.totals, d.totals());
        assert_eq!(snap.totals.total, Money::new(dec!(236)));
    }
}
