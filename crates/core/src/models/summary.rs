use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthKey;

/// Spend for one category within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Spend on one calendar day (zero when nothing was recorded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Month-bounded view over the transactions, ready for the chart layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: MonthKey,

    pub start: NaiveDate,

    pub end: NaiveDate,

    /// Sum of non-negative amounts in the window
    pub total: f64,

    /// Grouped by category, in order of first occurrence
    pub by_category: Vec<CategoryTotal>,

    /// One entry for every day of the month
    pub daily: Vec<DailyPoint>,
}

/// A category's spend against its monthly limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,

    /// 0 means unlimited
    pub monthly_limit: f64,

    pub spent: f64,

    /// `round(min(100, spent / limit * 100))`, 0 when unlimited
    pub used_pct: u32,

    /// Limited and at least 80% used
    pub at_risk: bool,
}

/// Due-date and interest estimate for a loan, relative to a reference day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProjection {
    pub loan_id: String,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub due_soon: bool,
    pub estimated_monthly_interest: f64,
}

/// Due date, utilisation and minimum payment for a credit card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardProjection {
    pub card_id: String,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub due_soon: bool,
    pub next_statement_date: NaiveDate,
    pub utilization_pct: u32,
    pub high_utilization: bool,
    pub minimum_due: f64,
    pub estimated_monthly_interest: f64,
}
