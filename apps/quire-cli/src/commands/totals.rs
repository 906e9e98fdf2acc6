//! # Totals Command
//!
//! `quire totals <document.json>`: loads a saved draft, re-prices every
//! line against its own reference data and prints the result.

use tracing::info;

use quire_core::{DocumentDraft, DraftSnapshot};

use crate::state::{DocumentEditor, EditorContext, QuireConfig};

/// Re-prices a loaded draft and returns what the form would show.
pub fn totals(context: EditorContext, draft: DocumentDraft) -> DraftSnapshot {
    let editor = DocumentEditor::open(context, draft);
    let snapshot = editor.snapshot();
    info!(
        kind = %snapshot.kind,
        lines = snapshot.lines.len(),
        total = %snapshot.totals.total,
        "Totals computed"
    );
    snapshot
}

/// Plain-text totals block, the way the form footer lays it out.
///
/// ```text
/// Subtotal                       $200.00
/// Tax                             $43.20
/// Discount                        $20.00
/// Shipping (incl. tax)            $59.00
/// Total                          $282.20
/// ```
pub fn render_summary(snapshot: &DraftSnapshot, config: &QuireConfig) -> String {
    let t = &snapshot.totals;
    let rows = [
        ("Subtotal", config.format_money(t.subtotal)),
        ("Tax", config.format_money(t.total_tax)),
        ("Discount", config.format_money(t.discount_amount)),
        ("Shipping (incl. tax)", config.format_money(t.total_shipping_with_tax)),
        ("Total", config.format_money(t.total)),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<24}{:>14}\n", label, value))
        .collect()
}
