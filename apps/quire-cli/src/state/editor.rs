//! # Document Editor
//!
//! Drives a [`DocumentDraft`] from UI events and re-emits a snapshot after
//! each one.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EditorEvent              DocumentDraft call         Emitted            │
//! │  ───────────              ──────────────────         ───────            │
//! │  add_line          ─────► add_line()          ─────► snapshot           │
//! │  remove_line {line}─────► remove_line(id)     ─────► snapshot           │
//! │  edit_line {line,  ─────► edit_line(id, edit) ─────► snapshot + warns   │
//! │             edit}                                                       │
//! │  set_charges {..}  ─────► set_charges(parsed) ─────► snapshot + warns   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded: the editor is owned by whoever drives it and every event
//! is applied to completion before the next.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use quire_core::types::{DiscountType, DocumentCharges};
use quire_core::{DocumentDraft, DraftSnapshot, LineEdit};

use crate::error::CliError;
use crate::state::EditorContext;

/// Addresses a line either by position in the table or by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineRef {
    Index(usize),
    Id(String),
}

/// The charges form as typed: every number is raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargesForm {
    /// Falls back to the configured default when absent.
    pub discount_type: Option<DiscountType>,
    pub discount_value: String,
    pub shipping_cost: String,
    pub shipping_tax_rate_percent: String,
}

/// One user action on the document form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    AddLine,
    RemoveLine { line: LineRef },
    EditLine { line: LineRef, edit: LineEdit },
    SetCharges { charges: ChargesForm },
}

/// Outcome of one event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorStep {
    pub event: EditorEvent,
    /// Soft diagnostics from the edit, as display messages.
    pub warnings: Vec<String>,
    pub snapshot: DraftSnapshot,
}

/// A draft plus the context it is edited in.
#[derive(Debug)]
pub struct DocumentEditor {
    context: EditorContext,
    draft: DocumentDraft,
}

impl DocumentEditor {
    /// Wraps a loaded draft, re-validating its lines first.
    pub fn open(context: EditorContext, mut draft: DocumentDraft) -> Self {
        for warning in draft.normalize() {
            warn!(company = ?context.company_id(), "{}", warning);
        }
        debug!(
            kind = %draft.kind(),
            lines = draft.lines().len(),
            "Document opened"
        );
        DocumentEditor { context, draft }
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn draft(&self) -> &DocumentDraft {
        &self.draft
    }

    pub fn into_draft(self) -> DocumentDraft {
        self.draft
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        self.draft.snapshot()
    }

    /// Applies one event and returns what the UI should render.
    ///
    /// ## Errors
    /// - `NOT_FOUND` if an edit addresses a line that does not exist
    ///
    /// Removing a missing line is not an error.
    pub fn apply(&mut self, event: EditorEvent) -> Result<EditorStep, CliError> {
        let mut warnings = Vec::new();

        match &event {
            EditorEvent::AddLine => {
                let id = self.draft.add_line();
                debug!(line_id = %id, "Line added");
            }
            EditorEvent::RemoveLine { line } => match self.resolve(line) {
                Some(id) => {
                    let removed = self.draft.remove_line(&id);
                    debug!(line_id = %id, removed, "Line removed");
                }
                None => debug!(?line, "Remove ignored, no such line"),
            },
            EditorEvent::EditLine { line, edit } => {
                let id = self
                    .resolve(line)
                    .ok_or_else(|| quire_core::PricingError::LineNotFound(describe(line)))?;
                for w in self.draft.edit_line(&id, edit.clone())? {
                    warn!(line_id = %id, "{}", w);
                    warnings.push(w.to_string());
                }
                debug!(line_id = %id, ?edit, "Line edited");
            }
            EditorEvent::SetCharges { charges } => {
                let parsed = self.parse_charges(charges);
                debug!(?parsed, "Charges updated");
                for w in self.draft.set_charges(parsed) {
                    warn!("{}", w);
                    warnings.push(w.to_string());
                }
            }
        }

        let snapshot = self.draft.snapshot();
        debug!(
            total = %self.context.config().format_money(snapshot.totals.total),
            "Totals recomputed"
        );

        Ok(EditorStep {
            event,
            warnings,
            snapshot,
        })
    }

    fn parse_charges(&self, form: &ChargesForm) -> DocumentCharges {
        DocumentCharges::parse(
            form.discount_type
                .unwrap_or(self.context.config().default_discount_type),
            &form.discount_value,
            &form.shipping_cost,
            &form.shipping_tax_rate_percent,
        )
    }

    fn resolve(&self, line: &LineRef) -> Option<String> {
        match line {
            LineRef::Index(i) => self.draft.lines().get(*i).map(|l| l.id.clone()),
            LineRef::Id(id) => self.draft.line(id).map(|l| l.id.clone()),
        }
    }
}

fn describe(line: &LineRef) -> String {
    match line {
        LineRef::Index(i) => format!("#{}", i),
        LineRef::Id(id) => id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::QuireConfig;
    use quire_core::types::{Catalog, DocumentKind, TaxRate, TaxRateTable};
    use quire_core::Money;
    use rust_decimal_macros::dec;

    fn editor(config: QuireConfig) -> DocumentEditor {
        let rates = TaxRateTable::new(vec![TaxRate {
            id: "gst".to_string(),
            name: "GST 18%".to_string(),
            rate_percent: dec!(18),
            is_default: true,
        }]);
        let draft = DocumentDraft::new(DocumentKind::Invoice, rates, Catalog::default());
        DocumentEditor::open(EditorContext::new(config), draft)
    }

    fn edit(index: usize, edit: LineEdit) -> EditorEvent {
        EditorEvent::EditLine {
            line: LineRef::Index(index),
            edit,
        }
    }

    #[test]
    fn test_events_emit_snapshots() {
        let mut ed = editor(QuireConfig::default());
        ed.apply(EditorEvent::AddLine).unwrap();
        ed.apply(edit(0, LineEdit::Quantity("1".into()))).unwrap();
        let step = ed.apply(edit(0, LineEdit::UnitPrice("118".into()))).unwrap();

        assert!(step.warnings.is_empty());
        assert_eq!(step.snapshot.totals.total, Money::new(dec!(118)));
    }

    #[test]
    fn test_edit_unknown_line_is_not_found() {
        let mut ed = editor(QuireConfig::default());
        let err = ed.apply(edit(3, LineEdit::Quantity("1".into()))).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_remove_unknown_line_is_ok() {
        let mut ed = editor(QuireConfig::default());
        let step = ed
            .apply(EditorEvent::RemoveLine {
                line: LineRef::Id("missing".into()),
            })
            .unwrap();
        assert!(step.snapshot.lines.is_empty());
    }

    #[test]
    fn test_charges_use_configured_discount_type() {
        let config = QuireConfig {
            default_discount_type: DiscountType::Fixed,
            ..QuireConfig::default()
        };
        let mut ed = editor(config);
        let step = ed
            .apply(EditorEvent::SetCharges {
                charges: ChargesForm {
                    discount_value: "5".into(),
                    shipping_cost: "oops".into(),
                    ..ChargesForm::default()
                },
            })
            .unwrap();

        assert_eq!(step.snapshot.charges.discount_type, DiscountType::Fixed);
        assert!(step.snapshot.charges.shipping_cost.is_zero());
        assert_eq!(step.snapshot.totals.discount_amount, Money::new(dec!(5)));
    }

    #[test]
    fn test_out_of_range_shipping_rate_is_a_warning() {
        let mut ed = editor(QuireConfig::default());
        let step = ed
            .apply(EditorEvent::SetCharges {
                charges: ChargesForm {
                    shipping_cost: "20".into(),
                    shipping_tax_rate_percent: "500".into(),
                    ..ChargesForm::default()
                },
            })
            .unwrap();

        assert_eq!(step.warnings.len(), 1);
        assert!(step.snapshot.totals.shipping_tax_amount.is_zero());
        assert_eq!(step.snapshot.totals.total, Money::new(dec!(20)));
    }

    #[test]
    fn test_open_resets_oversize_loaded_numbers() {
        let draft: DocumentDraft = serde_json::from_str(
            r#"{ "lines": [{ "id": "a", "quantity": "79228162514264337593543950335", "unitPrice": "2" }] }"#,
        )
        .unwrap();
        let ed = DocumentEditor::open(EditorContext::new(QuireConfig::default()), draft);

        assert_eq!(ed.draft().lines()[0].quantity, Some(rust_decimal::Decimal::ZERO));
        assert!(ed.snapshot().totals.total.is_zero());
    }

    #[test]
    fn test_unknown_tax_rate_is_a_warning() {
        let mut ed = editor(QuireConfig::default());
        ed.apply(EditorEvent::AddLine).unwrap();
        let step = ed.apply(edit(0, LineEdit::TaxRate("3".into()))).unwrap();
        assert_eq!(step.warnings.len(), 1);
        assert!(step.snapshot.lines[0].tax_rate_percent.is_zero());
    }

    #[test]
    fn test_event_json_shape() {
        let event: EditorEvent = serde_json::from_str(
            r#"{ "type": "edit_line", "line": 0, "edit": { "field": "quantity", "value": "2" } }"#,
        )
        .unwrap();
        assert_eq!(event, edit(0, LineEdit::Quantity("2".into())));
    }
}
