use serde::{Deserialize, Serialize};

use super::budget::{default_budgets, Budget};
use super::liability::{CreditCardAccount, LoanAccount};
use super::transaction::Transaction;

/// The application state: the four collections owned by the active session.
///
/// Services take it by reference and mutate it explicitly; nothing else holds
/// a copy. Each collection is persisted as a whole under its own storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Spending records, newest date first
    pub transactions: Vec<Transaction>,

    /// Per-category monthly limits, keyed by category name
    pub budgets: Vec<Budget>,

    pub loans: Vec<LoanAccount>,

    pub cards: Vec<CreditCardAccount>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: default_budgets(),
            loans: Vec::new(),
            cards: Vec::new(),
        }
    }
}

/// Names one of the four persisted ledger collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Transactions,
    Budgets,
    Loans,
    Cards,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Transactions,
        Collection::Budgets,
        Collection::Loans,
        Collection::Cards,
    ];

    /// Collections that belong to the signed-in user and are dropped on sign-out.
    pub const USER_OWNED: [Collection; 3] =
        [Collection::Transactions, Collection::Loans, Collection::Cards];

    /// Storage key for this collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Transactions => "spendmate_txns_v1",
            Collection::Budgets => "spendmate_budgets_v1",
            Collection::Loans => "spendmate_loans_v1",
            Collection::Cards => "spendmate_cards_v1",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
