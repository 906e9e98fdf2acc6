//! # State Module
//!
//! Everything the editing shell holds between events.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────────┐ │
//! │  │   QuireConfig    │──►│  EditorContext   │──►│   DocumentEditor     │ │
//! │  │                  │   │                  │   │                      │ │
//! │  │  • API base URL  │   │  • company id    │   │  • DocumentDraft     │ │
//! │  │  • currency      │   │  • session token │   │  • applies events    │ │
//! │  │  • discount type │   │  • config        │   │  • emits snapshots   │ │
//! │  └──────────────────┘   └──────────────────┘   └──────────────────────┘ │
//! │                                                                         │
//! │  QuireConfig: read-only after startup                                  │
//! │  EditorContext: owned by the editor, passed explicitly                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod context;
mod editor;

pub use config::QuireConfig;
pub use context::EditorContext;
pub use editor::{ChargesForm, DocumentEditor, EditorEvent, EditorStep, LineRef};
