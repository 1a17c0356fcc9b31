use std::collections::HashSet;

use crate::errors::CoreError;
use crate::models::budget::Budget;
use crate::models::ledger::Ledger;
use crate::models::summary::{BudgetStatus, CategoryTotal};
use crate::models::transaction::{Transaction, DEFAULT_CATEGORIES};

/// Share of a limit at which a category is flagged.
pub const AT_RISK_PCT: u32 = 80;

/// Joins configured limits with a month's per-category spend.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// `round(min(100, spent / limit * 100))`; 0 for an unlimited category.
    pub fn used_pct(spent: f64, monthly_limit: f64) -> u32 {
        if monthly_limit > 0.0 {
            (spent / monthly_limit * 100.0).clamp(0.0, 100.0).round() as u32
        } else {
            0
        }
    }

    /// Status of a single category.
    pub fn status(&self, category: &str, monthly_limit: f64, spent: f64) -> BudgetStatus {
        let used_pct = Self::used_pct(spent, monthly_limit);
        BudgetStatus {
            category: category.to_string(),
            monthly_limit,
            spent,
            used_pct,
            at_risk: monthly_limit > 0.0 && used_pct >= AT_RISK_PCT,
        }
    }

    /// One status per budget row (in budget order), followed by categories that
    /// have spend but no budget row (treated as unlimited).
    pub fn evaluate(&self, budgets: &[Budget], spend: &[CategoryTotal]) -> Vec<BudgetStatus> {
        let spent_for = |category: &str| {
            spend
                .iter()
                .find(|c| c.category == category)
                .map(|c| c.amount)
                .unwrap_or(0.0)
        };

        let mut statuses: Vec<BudgetStatus> = budgets
            .iter()
            .map(|b| self.status(&b.category, b.monthly_limit, spent_for(&b.category)))
            .collect();

        for c in spend {
            if !budgets.iter().any(|b| b.category == c.category) {
                statuses.push(self.status(&c.category, 0.0, c.amount));
            }
        }

        statuses
    }

    /// Only the flagged categories.
    pub fn at_risk(&self, budgets: &[Budget], spend: &[CategoryTotal]) -> Vec<BudgetStatus> {
        self.evaluate(budgets, spend)
            .into_iter()
            .filter(|s| s.at_risk)
            .collect()
    }

    /// Configured limit for a category, 0 when there is no row.
    pub fn limit_for(&self, budgets: &[Budget], category: &str) -> f64 {
        budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.monthly_limit)
            .unwrap_or(0.0)
    }

    /// Replace the row for `category` or append one.
    pub fn set_budget(
        &self,
        ledger: &mut Ledger,
        category: &str,
        monthly_limit: f64,
    ) -> Result<(), CoreError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(CoreError::ValidationError(
                "Budget category must not be blank".into(),
            ));
        }
        if !monthly_limit.is_finite() || monthly_limit < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Monthly limit for '{category}' must be a non-negative number, got {monthly_limit}"
            )));
        }

        match ledger.budgets.iter_mut().find(|b| b.category == category) {
            Some(row) => row.monthly_limit = monthly_limit,
            None => ledger.budgets.push(Budget::new(category, monthly_limit)),
        }
        Ok(())
    }

    /// Default categories, then budget categories, then transaction categories;
    /// de-duplicated, first occurrence wins.
    pub fn categories(&self, budgets: &[Budget], transactions: &[Transaction]) -> Vec<String> {
        let mut seen = HashSet::new();
        DEFAULT_CATEGORIES
            .iter()
            .copied()
            .chain(budgets.iter().map(|b| b.category.as_str()))
            .chain(transactions.iter().map(|t| t.category.as_str()))
            .filter(|c| seen.insert(*c))
            .map(str::to_string)
            .collect()
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
