use chrono::NaiveDate;

use crate::calendar;
use crate::errors::CoreError;
use crate::models::liability::{CreditCardAccount, LoanAccount, DEFAULT_MIN_PCT};
use crate::models::summary::{CardProjection, LoanProjection};

/// A due date this many days away (or fewer) counts as due soon.
pub const DUE_SOON_DAYS: i64 = 5;

/// Utilisation at or above this percentage is flagged.
pub const HIGH_UTILIZATION_PCT: u32 = 80;

/// Floor for a card's minimum payment, in currency units.
pub const MINIMUM_PAYMENT_FLOOR: f64 = 25.0;

/// Round to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Due-date projections and payment estimates for loans and cards.
///
/// Closed-form arithmetic only; no amortization schedule is built.
pub struct LiabilityService;

impl LiabilityService {
    pub fn new() -> Self {
        Self
    }

    /// `balance * (apr / 100) / 12`, or 0 when the APR is not positive.
    pub fn estimated_monthly_interest(balance: f64, apr: f64) -> f64 {
        if apr > 0.0 {
            balance * (apr / 100.0) / 12.0
        } else {
            0.0
        }
    }

    /// `round(balance / limit * 100)`, or 0 without a limit.
    pub fn utilization_pct(balance: f64, limit: f64) -> u32 {
        if limit > 0.0 {
            (balance / limit * 100.0).max(0.0).round() as u32
        } else {
            0
        }
    }

    /// `max(25, round2(min_pct * balance))`. A non-positive `min_pct` uses the 3% default.
    pub fn minimum_due(balance: f64, min_pct: f64) -> f64 {
        let pct = if min_pct > 0.0 { min_pct } else { DEFAULT_MIN_PCT };
        MINIMUM_PAYMENT_FLOOR.max(round2(pct * balance))
    }

    /// Next due date for `due_day` and how many days away it is from `today`.
    pub fn due_in(&self, due_day: u32, today: NaiveDate) -> Result<(NaiveDate, i64), CoreError> {
        let due_date = calendar::next_occurrence(due_day, today)?;
        Ok((due_date, (due_date - today).num_days()))
    }

    pub fn project_loan(
        &self,
        loan: &LoanAccount,
        today: NaiveDate,
    ) -> Result<LoanProjection, CoreError> {
        let (due_date, days_until_due) = self.due_in(loan.due_day, today)?;
        Ok(LoanProjection {
            loan_id: loan.id.clone(),
            due_date,
            days_until_due,
            due_soon: days_until_due <= DUE_SOON_DAYS,
            estimated_monthly_interest: Self::estimated_monthly_interest(loan.balance, loan.apr),
        })
    }

    pub fn project_card(
        &self,
        card: &CreditCardAccount,
        today: NaiveDate,
    ) -> Result<CardProjection, CoreError> {
        let (due_date, days_until_due) = self.due_in(card.due_day, today)?;
        let next_statement_date = calendar::next_occurrence(card.stmt_day, today)?;
        let utilization_pct = Self::utilization_pct(card.balance, card.limit);

        Ok(CardProjection {
            card_id: card.id.clone(),
            due_date,
            days_until_due,
            due_soon: days_until_due <= DUE_SOON_DAYS,
            next_statement_date,
            utilization_pct,
            high_utilization: utilization_pct >= HIGH_UTILIZATION_PCT,
            minimum_due: Self::minimum_due(card.balance, card.min_pct),
            estimated_monthly_interest: Self::estimated_monthly_interest(card.balance, card.apr),
        })
    }

    pub fn project_loans(
        &self,
        loans: &[LoanAccount],
        today: NaiveDate,
    ) -> Result<Vec<LoanProjection>, CoreError> {
        loans.iter().map(|l| self.project_loan(l, today)).collect()
    }

    pub fn project_cards(
        &self,
        cards: &[CreditCardAccount],
        today: NaiveDate,
    ) -> Result<Vec<CardProjection>, CoreError> {
        cards.iter().map(|c| self.project_card(c, today)).collect()
    }

    /// Balance after a payment: `max(0, round2(balance - amount))`.
    /// Overpayment floors at zero rather than failing.
    pub fn balance_after_payment(balance: f64, amount: f64) -> f64 {
        round2(balance - amount).max(0.0)
    }
}

impl Default for LiabilityService {
    fn default() -> Self {
        Self::new()
    }
}
