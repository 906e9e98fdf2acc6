//! # Commands Module
//!
//! One file per `quire` subcommand. Each command takes already-loaded
//! inputs and returns a serializable value; `lib.rs` owns file I/O and
//! printing.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, file loading)
//! ├── totals.rs   ◄─── Recompute a saved document
//! ├── replay.rs   ◄─── Apply a script of editor events
//! └── check.rs    ◄─── Submission gate and request payload
//! ```

pub mod check;
pub mod replay;
pub mod totals;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CliError, ErrorCode};

/// Reads and parses a JSON file.
///
/// ## Errors
/// - `IO` if the file cannot be read
/// - `INVALID_INPUT` if it is not valid JSON for `T`
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    debug!(path = %path.display(), "Loading JSON");
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        CliError::new(
            ErrorCode::InvalidInput,
            format!("{}: {}", path.display(), e),
        )
    })
}
