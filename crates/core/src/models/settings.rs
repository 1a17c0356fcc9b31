use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// User-configurable settings, persisted next to the ledger collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Display currency code (e.g., "USD", "EUR", "INR"). Amounts are never converted.
    pub currency: String,
}

impl Settings {
    /// Validate and normalise a currency code: exactly three ASCII letters, upper-cased.
    pub fn normalize_currency(currency: &str) -> Result<String, CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR, INR)"
            )));
        }
        Ok(trimmed)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
        }
    }
}
