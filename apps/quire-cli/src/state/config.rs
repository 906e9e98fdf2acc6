//! # Configuration State
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--company`)
//! 2. Environment variables (`QUIRE_*`)
//! 3. Defaults (this file)
//!
//! Read-only after initialization.

use serde::{Deserialize, Serialize};

use quire_core::types::{DiscountType, DocumentKind};
use quire_core::Money;

use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuireConfig {
    /// Company selected when the shell starts.
    pub company_id: Option<String>,

    /// Base URL of the ERP REST API; submissions are addressed relative to it.
    pub api_base_url: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Discount type preselected in the charges form.
    pub default_discount_type: DiscountType,
}

impl Default for QuireConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        QuireConfig {
            company_id: None,
            api_base_url: "http://localhost:8000/api".to_string(),
            currency_symbol: "$".to_string(),
            default_discount_type: DiscountType::Percentage,
        }
    }
}

impl QuireConfig {
    /// Creates a config from the process environment and defaults.
    ///
    /// ## Environment Variables
    /// - `QUIRE_COMPANY_ID`: Company to work in
    /// - `QUIRE_API_BASE_URL`: REST API base URL
    /// - `QUIRE_CURRENCY_SYMBOL`: Display symbol
    /// - `QUIRE_DEFAULT_DISCOUNT`: `percentage` or `fixed`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`QuireConfig::from_env`] with an injectable lookup, for tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = QuireConfig::default();

        if let Some(company_id) = lookup("QUIRE_COMPANY_ID").filter(|v| !v.trim().is_empty()) {
            config.company_id = Some(company_id);
        }

        if let Some(url) = lookup("QUIRE_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(symbol) = lookup("QUIRE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(value) = lookup("QUIRE_DEFAULT_DISCOUNT") {
            let normalized = value.trim().to_lowercase();
            config.default_discount_type = match normalized.as_str() {
                "percentage" | "percent" | "%" => DiscountType::Percentage,
                "fixed" | "amount" => DiscountType::Fixed,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "QUIRE_DEFAULT_DISCOUNT",
                        value,
                        reason: "expected 'percentage' or 'fixed'".to_string(),
                    })
                }
            };
        }

        Ok(config)
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use quire_cli::state::QuireConfig;
    /// use quire_core::Money;
    ///
    /// let config = QuireConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(-1234)), "-$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.round2().is_negative() { "-" } else { "" };
        let magnitude = Money::new(amount.amount().abs());
        format!("{}{}{}", sign, self.currency_symbol, magnitude)
    }

    /// Endpoint a document of this kind is submitted to.
    pub fn submission_url(&self, kind: DocumentKind) -> String {
        let resource = match kind {
            DocumentKind::Invoice => "invoices",
            DocumentKind::PurchaseOrder => "orders",
        };
        format!("{}/{}/", self.api_base_url, resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = QuireConfig::from_lookup(|_| None).unwrap();
        assert!(config.company_id.is_none());
        assert_eq!(config.default_discount_type, DiscountType::Percentage);
    }

    #[test]
    fn test_env_overrides() {
        let config = QuireConfig::from_lookup(lookup_from(&[
            ("QUIRE_COMPANY_ID", "acme"),
            ("QUIRE_API_BASE_URL", "https://erp.example.com/api/"),
            ("QUIRE_CURRENCY_SYMBOL", "₹"),
            ("QUIRE_DEFAULT_DISCOUNT", "Fixed"),
        ]))
        .unwrap();

        assert_eq!(config.company_id.as_deref(), Some("acme"));
        assert_eq!(config.api_base_url, "https://erp.example.com/api");
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.default_discount_type, DiscountType::Fixed);
        assert_eq!(
            config.submission_url(DocumentKind::PurchaseOrder),
            "https://erp.example.com/api/orders/"
        );
    }

    #[test]
    fn test_bad_discount_type() {
        let err = QuireConfig::from_lookup(lookup_from(&[("QUIRE_DEFAULT_DISCOUNT", "half")]))
            .unwrap_err();
        assert!(err.to_string().contains("QUIRE_DEFAULT_DISCOUNT"));
    }

    #[test]
    fn test_format_money() {
        let config = QuireConfig::default();
        assert_eq!(config.format_money(Money::from_cents(123456)), "$1234.56");
        assert_eq!(config.format_money(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_money(Money::zero()), "$0.00");
        assert_eq!(config.format_money(Money::from_cents(-550)), "-$5.50");
    }
}
