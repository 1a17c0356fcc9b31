use serde::{Deserialize, Serialize};

use super::transaction::DEFAULT_CATEGORIES;

/// Monthly spending limit for one category. The collection is keyed by
/// `category`; a limit of 0 means "no limit configured".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub category: String,
    pub monthly_limit: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, monthly_limit: f64) -> Self {
        Self {
            category: category.into(),
            monthly_limit,
        }
    }

    pub fn is_limited(&self) -> bool {
        self.monthly_limit > 0.0
    }
}

/// One unlimited budget row per default category.
pub fn default_budgets() -> Vec<Budget> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|c| Budget::new(*c, 0.0))
        .collect()
}
