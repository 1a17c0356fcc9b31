use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum-payment fraction used when a card has none configured.
pub const DEFAULT_MIN_PCT: f64 = 0.03;

/// Statement day used when a card draft leaves it out.
pub const DEFAULT_STATEMENT_DAY: u32 = 1;

/// Due day used when a card draft leaves it out.
pub const DEFAULT_CARD_DUE_DAY: u32 = 21;

/// An installment loan (car loan, mortgage, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanAccount {
    pub id: String,

    /// Display name, e.g. "Car Loan"
    pub name: String,

    /// Original amount borrowed (informational only)
    pub principal: f64,

    /// Current outstanding balance, never negative
    pub balance: f64,

    /// Annual percentage rate, e.g. 7.5
    pub apr: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,

    /// Day of month the payment is due (1-31, clamped per month)
    pub due_day: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// A revolving credit-card account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardAccount {
    pub id: String,

    pub name: String,

    /// Credit ceiling
    pub limit: f64,

    /// Current balance, never negative
    pub balance: f64,

    pub apr: f64,

    /// Day of month the statement is generated
    pub stmt_day: u32,

    /// Day of month the payment is due
    pub due_day: u32,

    /// Minimum payment as a fraction of the balance (0.03 = 3%)
    #[serde(default = "default_min_pct")]
    pub min_pct: f64,
}

fn default_min_pct() -> f64 {
    DEFAULT_MIN_PCT
}

/// Form input for creating or replacing a loan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDraft {
    pub name: String,
    #[serde(default)]
    pub principal: f64,
    /// Falls back to `principal` when absent.
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub apr: f64,
    #[serde(default)]
    pub term_months: Option<u32>,
    #[serde(default)]
    pub due_day: Option<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl LoanDraft {
    pub fn new(name: impl Into<String>, balance: f64, apr: f64, due_day: u32) -> Self {
        Self {
            name: name.into(),
            principal: 0.0,
            balance: Some(balance),
            apr,
            term_months: None,
            due_day: Some(due_day),
            start_date: None,
        }
    }
}

/// Form input for creating or replacing a credit card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub name: String,
    #[serde(default)]
    pub limit: f64,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub apr: f64,
    #[serde(default)]
    pub stmt_day: Option<u32>,
    #[serde(default)]
    pub due_day: Option<u32>,
    /// Fraction, e.g. 0.03. `None` (or a non-positive value) means the default.
    #[serde(default)]
    pub min_pct: Option<f64>,
}

impl CardDraft {
    pub fn new(name: impl Into<String>, limit: f64, balance: f64, apr: f64) -> Self {
        Self {
            name: name.into(),
            limit,
            balance,
            apr,
            ..Self::default()
        }
    }
}

/// Which kind of liability a payment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiabilityKind {
    Loan,
    Card,
}

impl std::fmt::Display for LiabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiabilityKind::Loan => write!(f, "Loan"),
            LiabilityKind::Card => write!(f, "Card"),
        }
    }
}
