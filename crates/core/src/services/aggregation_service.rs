use chrono::NaiveDate;
use std::collections::HashMap;

use crate::calendar::{self, MonthKey};
use crate::models::summary::{CategoryTotal, DailyPoint, MonthSummary};
use crate::models::transaction::Transaction;

/// Folds transactions into month-bounded totals for the summary cards and charts.
///
/// Pure: output depends only on the transactions and the month, so it is
/// recomputed after every mutation instead of cached.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Transactions dated inside the month (inclusive bounds), in input order.
    pub fn month_transactions<'a>(
        &self,
        transactions: &'a [Transaction],
        month: MonthKey,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|t| month.contains(t.date))
            .collect()
    }

    /// Total spend, per-category spend and the dense daily series for `month`.
    pub fn month_summary(&self, transactions: &[Transaction], month: MonthKey) -> MonthSummary {
        let (start, end) = calendar::month_bounds(month);
        let in_month = self.month_transactions(transactions, month);

        let total = in_month.iter().map(|t| t.amount.max(0.0)).sum();

        MonthSummary {
            month,
            start,
            end,
            total,
            by_category: Self::group_by_category(&in_month),
            daily: Self::daily_series(&in_month, month),
        }
    }

    /// Sum of non-negative amounts in the month.
    pub fn total_spend(&self, transactions: &[Transaction], month: MonthKey) -> f64 {
        self.month_transactions(transactions, month)
            .iter()
            .map(|t| t.amount.max(0.0))
            .sum()
    }

    /// Per-category totals for the month, in order of first occurrence.
    pub fn by_category(&self, transactions: &[Transaction], month: MonthKey) -> Vec<CategoryTotal> {
        Self::group_by_category(&self.month_transactions(transactions, month))
    }

    fn group_by_category(transactions: &[&Transaction]) -> Vec<CategoryTotal> {
        let mut groups: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for t in transactions {
            match index.get(t.category.as_str()) {
                Some(&i) => groups[i].amount += t.amount,
                None => {
                    index.insert(&t.category, groups.len());
                    groups.push(CategoryTotal {
                        category: t.category.clone(),
                        amount: t.amount,
                    });
                }
            }
        }

        groups
    }

    fn daily_series(transactions: &[&Transaction], month: MonthKey) -> Vec<DailyPoint> {
        let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
        for t in transactions {
            *by_day.entry(t.date).or_insert(0.0) += t.amount;
        }

        calendar::days_of_month(month)
            .map(|date| DailyPoint {
                date,
                amount: by_day.get(&date).copied().unwrap_or(0.0),
            })
            .collect()
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
