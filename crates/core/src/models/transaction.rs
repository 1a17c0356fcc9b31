use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category used when a submitted transaction has a blank one.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Category stamped on transactions created by a loan payment.
pub const LOAN_PAYMENT_CATEGORY: &str = "Loan Payment";

/// Category stamped on transactions created by a credit-card payment.
pub const CARD_PAYMENT_CATEGORY: &str = "Credit Card Payment";

/// Categories offered out of the box (and seeded as zero-limit budgets).
pub const DEFAULT_CATEGORIES: [&str; 12] = [
    "Food",
    "Groceries",
    "Transport",
    "Shopping",
    "Housing",
    "Utilities",
    "Health",
    "Entertainment",
    "Education",
    FALLBACK_CATEGORY,
    LOAN_PAYMENT_CATEGORY,
    CARD_PAYMENT_CATEGORY,
];

/// A single spending record.
///
/// `amount` is always a positive magnitude of money spent; income is not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier. Locally created rows carry a generated UUID until the
    /// remote store (if any) hands back its own id.
    pub id: String,

    pub amount: f64,

    pub category: String,

    /// Calendar date, daily granularity
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(amount: f64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: new_id(),
            amount,
            category: category.into(),
            date,
            note: None,
        }
    }

    pub fn with_note(
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::new(amount, category, date)
        }
    }
}

/// User input for creating or replacing a transaction.
///
/// With `id: Some(..)` matching a stored row the row is replaced; otherwise a
/// new row is created. Blank fields are defaulted by the ledger service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub note: Option<String>,
}

impl TransactionDraft {
    pub fn new(amount: f64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            amount,
            category: category.into(),
            date: Some(date),
            note: None,
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Turn this draft into a replacement for the row with `id`.
    pub fn replacing(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(t: &Transaction) -> Self {
        Self {
            id: Some(t.id.clone()),
            amount: t.amount,
            category: t.category.clone(),
            date: Some(t.date),
            note: t.note.clone(),
        }
    }
}

/// Generate a fresh entity identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
