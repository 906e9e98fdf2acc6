//! # Check Command
//!
//! `quire check <document.json> --counterparty <id>`: runs the save-time
//! checks and prints the request body the form would send.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Company selected?       ──NO──►  NO_COMPANY                        │
//! │  2. Signed in?              ──NO──►  UNAUTHORIZED                      │
//! │  3. Re-price every line                                                │
//! │  4. validate_submission()   ──ERR─►  VALIDATION_ERROR                  │
//! │  5. Build SubmissionRequest (lines with a catalog product only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::info;

use quire_core::types::{DocumentCharges, DocumentKind};
use quire_core::validation::validate_submission;
use quire_core::{DocumentDraft, DocumentTotals, LineItem};

use crate::error::CliError;
use crate::state::{DocumentEditor, EditorContext};

/// Body of the create-document request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub company_id: String,
    pub counterparty_id: String,
    pub kind: DocumentKind,
    /// Where the body is POSTed.
    pub endpoint: String,
    pub lines: Vec<LineItem>,
    pub charges: DocumentCharges,
    pub totals: DocumentTotals,
}

/// Validates a draft and builds its submission payload.
///
/// ## Errors
/// - `NO_COMPANY` if no company is selected
/// - `UNAUTHORIZED` if there is no session token
/// - `VALIDATION_ERROR` with the first failing rule
pub fn check(
    context: EditorContext,
    draft: DocumentDraft,
    counterparty_id: Option<&str>,
) -> Result<SubmissionRequest, CliError> {
    let company_id = context.require_company()?.to_string();
    context.authorization_header()?;

    let endpoint = context.config().submission_url(draft.kind());
    let editor = DocumentEditor::open(context, draft);
    let draft = editor.draft();

    validate_submission(draft, counterparty_id)?;

    let catalog = draft.catalog();
    let lines: Vec<LineItem> = draft
        .lines()
        .iter()
        .filter(|l| l.product_id.as_deref().is_some_and(|id| catalog.contains(id)))
        .cloned()
        .collect();

    info!(
        company = %company_id,
        kind = %draft.kind(),
        lines = lines.len(),
        "Document ready to submit"
    );

    Ok(SubmissionRequest {
        company_id,
        counterparty_id: counterparty_id.unwrap_or_default().trim().to_string(),
        kind: draft.kind(),
        endpoint,
        lines,
        charges: draft.charges().clone(),
        totals: draft.totals(),
    })
}
