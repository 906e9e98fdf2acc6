//! # Domain Types
//!
//! Reference data and document-level inputs for the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │ CatalogProduct  │   │ DocumentCharges │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  discount_type  │       │
//! │  │  name           │   │  name           │   │  discount_value │       │
//! │  │  rate_percent   │   │  description    │   │  shipping_cost  │       │
//! │  │  is_default     │   │  unit_price     │   │  shipping_tax_% │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  DocumentKind   │   │  DiscountType   │                             │
//! │  │  Invoice        │   │  Percentage     │                             │
//! │  │  PurchaseOrder  │   │  Fixed          │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax rates and catalog products arrive already fetched from the REST API;
//! this crate only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::money::{parse_decimal_lenient, Money};
use crate::validation::{validate_input_magnitude, validate_percent, validate_tax_percent};

// =============================================================================
// Tax Rate
// =============================================================================

/// A tax rate configured for the company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxRate {
    pub id: String,

    /// Display name, e.g. "GST 18%".
    pub name: String,

    /// Percentage in [0, 100]; 18 means 18%.
    #[ts(type = "string")]
    pub rate_percent: Decimal,

    /// Applied to new lines and to product selections without a rate.
    #[serde(default)]
    pub is_default: bool,
}

/// The tax rates a document may use.
///
/// A line's rate is always one of these or exactly 0 ("no tax").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRateTable(Vec<TaxRate>);

impl TaxRateTable {
    pub fn new(rates: Vec<TaxRate>) -> Self {
        TaxRateTable(rates)
    }

    pub fn rates(&self) -> &[TaxRate] {
        &self.0
    }

    /// The first rate flagged as default, if any.
    pub fn default_rate(&self) -> Option<&TaxRate> {
        self.0.iter().find(|r| r.is_default)
    }

    /// The default rate's percentage, or 0 when no usable default is configured.
    pub fn default_percent(&self) -> Decimal {
        self.default_rate()
            .map(|r| r.rate_percent)
            .filter(|p| validate_tax_percent(*p).is_ok())
            .unwrap_or(Decimal::ZERO)
    }

    /// Checks that `percent` is selectable on this document.
    ///
    /// ## Returns
    /// - `Ok(percent)` if it is 0 or matches a configured rate (`18` matches `18.00`)
    /// - `Err(PricingError::UnknownTaxRate)` otherwise, including a configured
    ///   rate outside [0, 100]; callers fall back to 0
    pub fn resolve_percent(&self, percent: Decimal) -> PricingResult<Decimal> {
        if percent.is_zero() {
            return Ok(percent);
        }
        let configured = self.0.iter().any(|r| r.rate_percent == percent);
        if configured && validate_tax_percent(percent).is_ok() {
            return Ok(percent);
        }
        Err(PricingError::UnknownTaxRate { percent })
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A product offered in the line-item product picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Tax-inclusive sale price.
    pub unit_price: Money,
}

/// Products available to the current document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<CatalogProduct>);

impl Catalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Catalog(products)
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.0
    }

    pub fn find(&self, product_id: &str) -> Option<&CatalogProduct> {
        self.0.iter().find(|p| p.id == product_id)
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.find(product_id).is_some()
    }
}

// =============================================================================
// Document Kind
// =============================================================================

/// The two screens that price line items.
///
/// They differ in one formula: an invoice folds the document's shipping
/// cost into each line's per-unit tax base, a purchase order does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    #[default]
    Invoice,
    PurchaseOrder,
}

impl DocumentKind {
    /// Who the document is addressed to, for validation messages.
    pub fn counterparty_label(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "customer",
            DocumentKind::PurchaseOrder => "vendor",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Invoice => write!(f, "invoice"),
            DocumentKind::PurchaseOrder => write!(f, "purchase order"),
        }
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// How `discount_value` is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percent of the subtotal.
    #[default]
    Percentage,
    /// Absolute amount.
    Fixed,
}

// =============================================================================
// Document Charges
// =============================================================================

/// Document-level inputs that sit below the line table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentCharges {
    pub discount_type: DiscountType,

    /// Percent when `discount_type` is `Percentage`, otherwise an amount.
    #[ts(type = "string")]
    pub discount_value: Decimal,

    pub shipping_cost: Money,

    #[ts(type = "string")]
    pub shipping_tax_rate_percent: Decimal,
}

impl DocumentCharges {
    /// Builds charges from raw form text; unusable numbers become 0.
    ///
    /// ## Example
    /// ```rust
    /// use quire_core::types::{DiscountType, DocumentCharges};
    ///
    /// let charges = DocumentCharges::parse(DiscountType::Fixed, "abc", "50", "10");
    /// assert!(charges.discount_value.is_zero());
    /// assert_eq!(charges.shipping_cost.to_string(), "50.00");
    /// ```
    pub fn parse(
        discount_type: DiscountType,
        discount_value: &str,
        shipping_cost: &str,
        shipping_tax_rate_percent: &str,
    ) -> Self {
        DocumentCharges {
            discount_type,
            discount_value: parse_decimal_lenient(discount_value),
            shipping_cost: Money::parse_lenient(shipping_cost),
            shipping_tax_rate_percent: parse_decimal_lenient(shipping_tax_rate_percent),
        }
    }

    /// Resets unusable values to 0 and reports each one.
    ///
    /// - discount value and shipping cost: magnitude above the input limit
    /// - shipping tax rate: outside [0, 100]
    pub fn sanitize(&mut self) -> Vec<PricingError> {
        let mut warnings = Vec::new();

        if let Err(err) = validate_input_magnitude("discount", self.discount_value) {
            self.discount_value = Decimal::ZERO;
            warnings.push(err.into());
        }
        if let Err(err) = validate_input_magnitude("shipping cost", self.shipping_cost.amount()) {
            self.shipping_cost = Money::zero();
            warnings.push(err.into());
        }
        if let Err(err) = validate_percent("shipping tax rate", self.shipping_tax_rate_percent) {
            self.shipping_tax_rate_percent = Decimal::ZERO;
            warnings.push(err.into());
        }

        warnings
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
