// ═══════════════════════════════════════════════════════════════════
// Model Tests: constructors, defaults, serde shape of persisted types
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use spendmate_core::models::budget::{default_budgets, Budget};
use spendmate_core::models::ledger::{Collection, Ledger};
use spendmate_core::models::liability::{CreditCardAccount, LoanAccount, DEFAULT_MIN_PCT};
use spendmate_core::models::session::{Session, SessionState, User};
use spendmate_core::models::settings::Settings;
use spendmate_core::models::sync::{WriteOp, WriteState, WriteTicket};
use spendmate_core::models::transaction::{
    Transaction, TransactionDraft, DEFAULT_CATEGORIES, FALLBACK_CATEGORY,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn session(user_id: &str) -> Session {
    Session {
        user: User {
            id: user_id.into(),
            email: Some("me@example.com".into()),
        },
        access_token: "secret-token".into(),
        refresh_token: None,
    }
}

// ── Transaction ─────────────────────────────────────────────────────

mod transaction {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        let a = Transaction::new(5.0, "Food", d(2024, 1, 1));
        let b = Transaction::new(5.0, "Food", d(2024, 1, 1));
        assert_ne!(a.id, b.id);
        assert!(a.note.is_none());
    }

    #[test]
    fn with_note_sets_note() {
        let t = Transaction::with_note(12.5, "Food", d(2024, 1, 2), "lunch");
        assert_eq!(t.note.as_deref(), Some("lunch"));
    }

    #[test]
    fn json_uses_iso_date_and_omits_empty_note() {
        let mut t = Transaction::new(12.5, "Food", d(2024, 3, 9));
        t.id = "t1".into();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["amount"], 12.5);
        assert!(json.get("note").is_none());
    }

    #[test]
    fn deserializes_without_note() {
        let t: Transaction = serde_json::from_str(
            r#"{"id":"x","amount":3,"category":"Transport","date":"2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(t.amount, 3.0);
        assert_eq!(t.note, None);
    }

    #[test]
    fn draft_from_transaction_targets_its_id() {
        let t = Transaction::with_note(9.0, "Health", d(2024, 2, 2), "pharmacy");
        let draft = TransactionDraft::from(&t);
        assert_eq!(draft.id.as_deref(), Some(t.id.as_str()));
        assert_eq!(draft.date, Some(t.date));
        assert_eq!(draft.note.as_deref(), Some("pharmacy"));
    }

    #[test]
    fn draft_builders() {
        let draft = TransactionDraft::new(4.0, "Food", d(2024, 1, 1))
            .note("coffee")
            .replacing("abc");
        assert_eq!(draft.id.as_deref(), Some("abc"));
        assert_eq!(draft.note.as_deref(), Some("coffee"));
    }

    #[test]
    fn default_categories_include_fallback_and_payments() {
        assert!(DEFAULT_CATEGORIES.contains(&FALLBACK_CATEGORY));
        assert!(DEFAULT_CATEGORIES.contains(&"Loan Payment"));
        assert!(DEFAULT_CATEGORIES.contains(&"Credit Card Payment"));
    }
}

// ── Budget / Ledger ─────────────────────────────────────────────────

mod ledger {
    use super::*;

    #[test]
    fn default_budgets_are_unlimited_rows_per_default_category() {
        let budgets = default_budgets();
        assert_eq!(budgets.len(), DEFAULT_CATEGORIES.len());
        assert!(budgets.iter().all(|b| !b.is_limited()));
    }

    #[test]
    fn budget_json_is_camel_case() {
        let json = serde_json::to_value(Budget::new("Food", 300.0)).unwrap();
        assert_eq!(json["monthlyLimit"], 300.0);
        assert_eq!(json["category"], "Food");
    }

    #[test]
    fn default_ledger_is_empty_apart_from_budgets() {
        let ledger = Ledger::default();
        assert!(ledger.transactions.is_empty());
        assert!(ledger.loans.is_empty());
        assert!(ledger.cards.is_empty());
        assert_eq!(ledger.budgets, default_budgets());
    }

    #[test]
    fn collection_keys_are_versioned_and_distinct() {
        let keys: Vec<&str> = Collection::ALL.iter().map(|c| c.key()).collect();
        assert!(keys.iter().all(|k| k.starts_with("spendmate_") && k.ends_with("_v1")));
        let mut unique = keys.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), keys.len());
        assert_eq!(Collection::Transactions.to_string(), "spendmate_txns_v1");
    }
}

// ── Liabilities ─────────────────────────────────────────────────────

mod liability {
    use super::*;

    #[test]
    fn loan_json_is_camel_case() {
        let loan = LoanAccount {
            id: "l1".into(),
            name: "Car".into(),
            principal: 10_000.0,
            balance: 8_000.0,
            apr: 6.0,
            term_months: Some(48),
            due_day: 15,
            start_date: Some(d(2023, 1, 1)),
        };
        let json = serde_json::to_value(&loan).unwrap();
        assert_eq!(json["termMonths"], 48);
        assert_eq!(json["dueDay"], 15);
        assert_eq!(json["startDate"], "2023-01-01");
    }

    #[test]
    fn card_without_min_pct_uses_default() {
        let card: CreditCardAccount = serde_json::from_str(
            r#"{"id":"c1","name":"Visa","limit":5000,"balance":1200,"apr":24,"stmtDay":1,"dueDay":21}"#,
        )
        .unwrap();
        assert_eq!(card.min_pct, DEFAULT_MIN_PCT);
        assert_eq!(card.stmt_day, 1);
    }
}

// ── Settings ────────────────────────────────────────────────────────

mod settings {
    use super::*;

    #[test]
    fn default_currency_is_usd() {
        assert_eq!(Settings::default().currency, "USD");
    }

    #[test]
    fn normalize_uppercases_and_trims() {
        assert_eq!(Settings::normalize_currency(" inr ").unwrap(), "INR");
    }

    #[test]
    fn normalize_rejects_bad_codes() {
        for bad in ["", "US", "USDT", "U$D", "12A"] {
            assert!(Settings::normalize_currency(bad).is_err(), "{bad:?}");
        }
    }
}

// ── Session ─────────────────────────────────────────────────────────

mod session_state {
    use super::*;

    #[test]
    fn only_local_and_signed_in_are_active() {
        assert!(SessionState::LocalOnly.is_active());
        assert!(SessionState::SignedIn(session("u1")).is_active());
        assert!(!SessionState::Unknown.is_active());
        assert!(!SessionState::SignedOut.is_active());
        assert!(!SessionState::Unavailable("timeout".into()).is_active());
    }

    #[test]
    fn user_is_exposed_only_when_signed_in() {
        assert_eq!(
            SessionState::SignedIn(session("u1")).user().map(|u| u.id.as_str()),
            Some("u1")
        );
        assert!(SessionState::LocalOnly.user().is_none());
    }

    #[test]
    fn debug_redacts_access_token() {
        let out = format!("{:?}", session("u1"));
        assert!(!out.contains("secret-token"));
        assert!(out.contains("redacted"));
    }
}

// ── Sync ────────────────────────────────────────────────────────────

mod sync {
    use super::*;

    #[test]
    fn local_id_of_each_op() {
        let mut t = Transaction::new(1.0, "Food", d(2024, 1, 1));
        t.id = "tmp".into();
        let upsert = WriteOp::Upsert {
            transaction: t,
            is_new: true,
        };
        assert_eq!(upsert.local_id(), "tmp");
        assert_eq!(WriteOp::Delete { id: "x".into() }.local_id(), "x");
    }

    #[test]
    fn pending_state() {
        assert!(WriteState::Pending { temp_id: "a".into() }.is_pending());
        assert!(!WriteState::Committed { id: "a".into() }.is_pending());
        assert!(!WriteState::Failed { error: "e".into() }.is_pending());
    }

    #[test]
    fn ticket_display() {
        assert_eq!(WriteTicket(7).to_string(), "#7");
    }
}
