//! # Editor Context
//!
//! Who is editing and on behalf of which company.
//!
//! The browser app kept the selected company and the session token in
//! globals. Here they are an explicit value handed to the editor and to
//! every command that needs them.

use std::fmt;

use crate::error::{CliError, ErrorCode};
use crate::state::QuireConfig;

/// Explicit editing context.
#[derive(Clone)]
pub struct EditorContext {
    company_id: Option<String>,
    auth_token: Option<String>,
    config: QuireConfig,
}

impl EditorContext {
    /// Builds a context from configuration; the company defaults to the
    /// configured one.
    pub fn new(config: QuireConfig) -> Self {
        EditorContext {
            company_id: config.company_id.clone(),
            auth_token: None,
            config,
        }
    }

    /// Reads the session token from `QUIRE_AUTH_TOKEN`.
    pub fn with_env_token(self) -> Self {
        let token = std::env::var("QUIRE_AUTH_TOKEN").ok();
        self.with_token(token)
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Switches company (the company picker in the header).
    pub fn select_company(&mut self, company_id: impl Into<String>) {
        self.company_id = Some(company_id.into());
    }

    pub fn config(&self) -> &QuireConfig {
        &self.config
    }

    pub fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }

    /// The selected company, or an error if none is selected.
    pub fn require_company(&self) -> Result<&str, CliError> {
        self.company_id().ok_or_else(|| {
            CliError::new(
                ErrorCode::NoCompany,
                "Select a company before creating documents",
            )
        })
    }

    /// `Authorization` header value for API calls, or an error if signed out.
    pub fn authorization_header(&self) -> Result<String, CliError> {
        self.auth_token
            .as_deref()
            .map(|t| format!("Bearer {}", t))
            .ok_or_else(|| CliError::new(ErrorCode::Unauthorized, "Not signed in"))
    }
}

/// Never prints the token.
impl fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorContext")
            .field("company_id", &self.company_id)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("config", &self.config)
            .finish()
    }
}
