//! # CLI Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in quire-cli                              │
//! │                                                                         │
//! │  Document file ── serde_json::Error ──┐                                 │
//! │                                       │                                 │
//! │  Editor event ─── PricingError ───────┼──► CliError { code, message }  │
//! │                                       │           │                     │
//! │  Save check ───── ValidationError ────┘           ▼                     │
//! │                                          stderr as JSON, exit 1         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shape matches what the browser UI expects from a failed call:
//! ```json
//! { "code": "VALIDATION_ERROR", "message": "customer is required" }
//! ```

use serde::Serialize;
use thiserror::Error;

use quire_core::{PricingError, ValidationError};

/// Error returned from CLI commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A line referenced by an event does not exist
    NotFound,

    /// Submission validation failed
    ValidationError,

    /// A document or script file could not be parsed
    InvalidInput,

    /// No company selected in the editing context
    NoCompany,

    /// No session token in the editing context
    Unauthorized,

    /// Configuration could not be loaded
    ConfigError,

    /// File could not be read
    Io,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Serializes the error for stderr.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Environment configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts pricing errors to CLI errors.
impl From<PricingError> for CliError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::LineNotFound(id) => {
                CliError::new(ErrorCode::NotFound, format!("Line not found: {}", id))
            }
            PricingError::UnknownProduct(id) => {
                CliError::new(ErrorCode::NotFound, format!("Product not found: {}", id))
            }
            PricingError::UnknownTaxRate { .. } => {
                CliError::new(ErrorCode::InvalidInput, err.to_string())
            }
            PricingError::Validation(e) => CliError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::new(ErrorCode::InvalidInput, format!("Invalid JSON: {}", err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O failure: {}", err);
        CliError::new(ErrorCode::Io, err.to_string())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}
