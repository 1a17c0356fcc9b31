use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::liability::{
    CardDraft, CreditCardAccount, LoanAccount, LoanDraft, DEFAULT_CARD_DUE_DAY, DEFAULT_MIN_PCT,
    DEFAULT_STATEMENT_DAY,
};
use crate::models::transaction::new_id;

/// Creates, replaces and deletes loan and credit-card accounts.
///
/// Drafts are normalised the same way on create and on replace: negative
/// numbers are clamped to zero and day fields to 1..=31.
pub struct AccountService;

impl AccountService {
    pub fn new() -> Self {
        Self
    }

    // ── Loans ───────────────────────────────────────────────────────

    /// Validate a loan draft. The name is required and the balance (falling back
    /// to the principal) must be positive; the principal falls back to the balance.
    pub fn build_loan(&self, id: String, draft: &LoanDraft) -> Result<LoanAccount, CoreError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError("Please enter a loan name".into()));
        }

        let principal = non_negative(draft.principal);
        let balance = non_negative(draft.balance.unwrap_or(draft.principal));
        if balance <= 0.0 {
            return Err(CoreError::ValidationError(
                "Loan balance must be greater than zero".into(),
            ));
        }

        Ok(LoanAccount {
            id,
            name: name.to_string(),
            principal: if principal > 0.0 { principal } else { balance },
            balance,
            apr: non_negative(draft.apr),
            term_months: draft.term_months.filter(|m| *m > 0),
            due_day: clamp_day(draft.due_day.unwrap_or(1)),
            start_date: draft.start_date,
        })
    }

    /// Add a loan at the head of the list. Returns its new id.
    pub fn add_loan(&self, ledger: &mut Ledger, draft: &LoanDraft) -> Result<String, CoreError> {
        let loan = self.build_loan(new_id(), draft)?;
        let id = loan.id.clone();
        ledger.loans.insert(0, loan);
        tracing::debug!(%id, "loan added");
        Ok(id)
    }

    /// Replace the loan with `id` using the draft's fields.
    pub fn update_loan(
        &self,
        ledger: &mut Ledger,
        id: &str,
        draft: &LoanDraft,
    ) -> Result<(), CoreError> {
        let idx = ledger
            .loans
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| CoreError::AccountNotFound(id.to_string()))?;
        ledger.loans[idx] = self.build_loan(id.to_string(), draft)?;
        Ok(())
    }

    /// Delete a loan. Past payment transactions are kept. Absent ids are a no-op.
    pub fn remove_loan(&self, ledger: &mut Ledger, id: &str) -> Option<LoanAccount> {
        let idx = ledger.loans.iter().position(|l| l.id == id)?;
        Some(ledger.loans.remove(idx))
    }

    // ── Credit cards ────────────────────────────────────────────────

    pub fn build_card(&self, id: String, draft: &CardDraft) -> Result<CreditCardAccount, CoreError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError("Please enter a card name".into()));
        }

        let min_pct = draft
            .min_pct
            .filter(|p| p.is_finite() && *p > 0.0)
            .unwrap_or(DEFAULT_MIN_PCT);

        Ok(CreditCardAccount {
            id,
            name: name.to_string(),
            limit: non_negative(draft.limit),
            balance: non_negative(draft.balance),
            apr: non_negative(draft.apr),
            stmt_day: clamp_day(draft.stmt_day.unwrap_or(DEFAULT_STATEMENT_DAY)),
            due_day: clamp_day(draft.due_day.unwrap_or(DEFAULT_CARD_DUE_DAY)),
            min_pct,
        })
    }

    pub fn add_card(&self, ledger: &mut Ledger, draft: &CardDraft) -> Result<String, CoreError> {
        let card = self.build_card(new_id(), draft)?;
        let id = card.id.clone();
        ledger.cards.insert(0, card);
        tracing::debug!(%id, "card added");
        Ok(id)
    }

    pub fn update_card(
        &self,
        ledger: &mut Ledger,
        id: &str,
        draft: &CardDraft,
    ) -> Result<(), CoreError> {
        let idx = ledger
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::AccountNotFound(id.to_string()))?;
        ledger.cards[idx] = self.build_card(id.to_string(), draft)?;
        Ok(())
    }

    pub fn remove_card(&self, ledger: &mut Ledger, id: &str) -> Option<CreditCardAccount> {
        let idx = ledger.cards.iter().position(|c| c.id == id)?;
        Some(ledger.cards.remove(idx))
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn clamp_day(day: u32) -> u32 {
    day.clamp(1, 31)
}
