//! # Replay Command
//!
//! `quire replay <script.json>`: feeds a recorded sequence of editor events
//! into a draft and reports the snapshot after each one.
//!
//! ## Script Format
//! ```json
//! {
//!   "document": { "kind": "invoice", "taxRates": [...], "catalog": [...] },
//!   "events": [
//!     { "type": "add_line" },
//!     { "type": "edit_line", "line": 0, "edit": { "field": "product", "value": "p-1" } },
//!     { "type": "edit_line", "line": 0, "edit": { "field": "quantity", "value": "2" } },
//!     { "type": "set_charges", "charges": { "shippingCost": "50" } }
//!   ]
//! }
//! ```
//!
//! Replay stops at the first event that fails; warnings do not stop it.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use quire_core::DocumentDraft;

use crate::error::CliError;
use crate::state::{DocumentEditor, EditorContext, EditorEvent, EditorStep};

/// A starting document and the events to apply to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScript {
    pub document: DocumentDraft,
    #[serde(default)]
    pub events: Vec<EditorEvent>,
}

/// Applies every event in order.
///
/// ## Returns
/// One [`EditorStep`] per event, and the final draft.
pub fn replay(
    context: EditorContext,
    script: ReplayScript,
) -> Result<(Vec<EditorStep>, DocumentDraft), CliError> {
    let mut editor = DocumentEditor::open(context, script.document);
    let mut steps = Vec::with_capacity(script.events.len());

    for (index, event) in script.events.into_iter().enumerate() {
        let _span = info_span!("event", index).entered();
        steps.push(editor.apply(event)?);
    }

    info!(
        events = steps.len(),
        total = %editor.snapshot().totals.total,
        "Replay finished"
    );
    Ok((steps, editor.into_draft()))
}
