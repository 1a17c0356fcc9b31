use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::liability::LiabilityKind;
use crate::models::transaction::{
    new_id, Transaction, TransactionDraft, CARD_PAYMENT_CATEGORY, FALLBACK_CATEGORY,
    LOAN_PAYMENT_CATEGORY,
};
use crate::services::liability_service::LiabilityService;

/// Result of an upsert: the stored row and whether it was newly inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted {
    pub transaction: Transaction,
    pub is_new: bool,
}

/// Applies create/replace/delete to the transaction collection and payments
/// to liability balances.
///
/// Ordering invariant: transactions are kept date-descending. The sort is
/// stable and new rows go in at the head first, so equal dates list the most
/// recently inserted row first and a replaced row keeps its slot.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Validate and normalise a draft into a transaction (without an id decision).
    ///
    /// Rejects a missing or non-positive amount. Blank category → "Other",
    /// missing date → `today`, note trimmed (empty → none).
    pub fn normalize(
        &self,
        draft: &TransactionDraft,
        today: NaiveDate,
    ) -> Result<Transaction, CoreError> {
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(CoreError::ValidationError(
                "Please enter a valid amount (must be greater than zero)".into(),
            ));
        }

        let category = draft.category.trim();
        let note = draft
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Transaction {
            id: String::new(),
            amount: draft.amount.abs(),
            category: if category.is_empty() {
                FALLBACK_CATEGORY.to_string()
            } else {
                category.to_string()
            },
            date: draft.date.unwrap_or(today),
            note,
        })
    }

    /// Replace the row whose id matches the draft's, or insert a new row with a
    /// fresh id. The collection is re-sorted afterwards.
    pub fn upsert(
        &self,
        ledger: &mut Ledger,
        draft: &TransactionDraft,
        today: NaiveDate,
    ) -> Result<Upserted, CoreError> {
        let mut txn = self.normalize(draft, today)?;

        let existing = draft
            .id
            .as_deref()
            .and_then(|id| ledger.transactions.iter().position(|t| t.id == id));

        let is_new = match existing {
            Some(idx) => {
                txn.id = ledger.transactions[idx].id.clone();
                ledger.transactions[idx] = txn.clone();
                false
            }
            None => {
                txn.id = new_id();
                ledger.transactions.insert(0, txn.clone());
                true
            }
        };

        Self::sort_newest_first(&mut ledger.transactions);
        tracing::debug!(id = %txn.id, is_new, "transaction stored");

        Ok(Upserted {
            transaction: txn,
            is_new,
        })
    }

    /// Delete by id. Absent ids are a no-op (returns `None`).
    pub fn remove(&self, ledger: &mut Ledger, id: &str) -> Option<Transaction> {
        let idx = ledger.transactions.iter().position(|t| t.id == id)?;
        Some(ledger.transactions.remove(idx))
    }

    /// Swap a locally held row for the authoritative one returned by the remote
    /// store, matched by the local id or the remote id. When neither is held
    /// any more (the collection was replaced meanwhile) the authoritative row
    /// is inserted, so the local view matches the remote store.
    ///
    /// Callers must not reconcile a row whose deletion is still queued.
    pub fn reconcile(&self, ledger: &mut Ledger, local_id: &str, authoritative: Transaction) {
        match ledger
            .transactions
            .iter()
            .position(|t| t.id == local_id || t.id == authoritative.id)
        {
            Some(idx) => ledger.transactions[idx] = authoritative,
            None => {
                tracing::debug!(id = %authoritative.id, "committed row missing locally; inserting");
                ledger.transactions.insert(0, authoritative);
            }
        }
        Self::sort_newest_first(&mut ledger.transactions);
    }

    /// Give a local row its remote id without touching its fields. Used while a
    /// newer edit of the same row is still queued.
    pub fn rename(&self, ledger: &mut Ledger, local_id: &str, id: &str) -> bool {
        match ledger.transactions.iter_mut().find(|t| t.id == local_id) {
            Some(t) => {
                t.id = id.to_string();
                true
            }
            None => false,
        }
    }

    /// Replace the whole collection (e.g. with the remote list after sign-in).
    pub fn replace_all(&self, ledger: &mut Ledger, mut transactions: Vec<Transaction>) {
        Self::sort_newest_first(&mut transactions);
        ledger.transactions = transactions;
    }

    /// Pay down a loan or card and record the payment as a transaction.
    ///
    /// Nothing is mutated unless the amount is valid and the account exists.
    pub fn apply_payment(
        &self,
        ledger: &mut Ledger,
        kind: LiabilityKind,
        account_id: &str,
        amount: f64,
        date: NaiveDate,
        note: Option<&str>,
    ) -> Result<Upserted, CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(
                "Payment amount must be greater than zero".into(),
            ));
        }

        let (name, category) = match kind {
            LiabilityKind::Loan => {
                let loan = ledger
                    .loans
                    .iter_mut()
                    .find(|l| l.id == account_id)
                    .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
                loan.balance = LiabilityService::balance_after_payment(loan.balance, amount);
                (loan.name.clone(), LOAN_PAYMENT_CATEGORY)
            }
            LiabilityKind::Card => {
                let card = ledger
                    .cards
                    .iter_mut()
                    .find(|c| c.id == account_id)
                    .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
                card.balance = LiabilityService::balance_after_payment(card.balance, amount);
                (card.name.clone(), CARD_PAYMENT_CATEGORY)
            }
        };

        let note = match note.map(str::trim).filter(|n| !n.is_empty()) {
            Some(extra) => format!("{name} - {extra}"),
            None => name,
        };
        let draft = TransactionDraft::new(amount, category, date).note(note);

        tracing::info!(%kind, account_id, amount, "payment applied");
        self.upsert(ledger, &draft, date)
    }

    fn sort_newest_first(transactions: &mut [Transaction]) {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
