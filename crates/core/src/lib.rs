pub mod calendar;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod remote;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use calendar::MonthKey;
use config::RemoteConfig;
use models::{
    budget::{default_budgets, Budget},
    ledger::{Collection, Ledger},
    liability::{CardDraft, CreditCardAccount, LiabilityKind, LoanAccount, LoanDraft},
    session::{Session, SessionEvent, SessionState, User},
    settings::Settings,
    summary::{BudgetStatus, CardProjection, LoanProjection, MonthSummary},
    sync::{PendingWrite, WriteOp, WriteState, WriteTicket},
    transaction::{Transaction, TransactionDraft},
};
use remote::supabase::SupabaseClient;
use remote::traits::{IdentityProvider, RemoteStore};
use services::{
    account_service::AccountService,
    aggregation_service::AggregationService,
    budget_service::BudgetService,
    export_service::{ExportFile, ExportService, ExportSink},
    ledger_service::{LedgerService, Upserted},
    liability_service::LiabilityService,
    sync_service::{SubscriptionId, SyncService, WriteListener},
};
use storage::blob::BlobStore;
use storage::manager::StorageManager;

use errors::CoreError;

/// Minimum length accepted for a new password.
const MIN_PASSWORD_LEN: usize = 8;

/// Callback invoked after every session state change.
pub type SessionListener = Box<dyn Fn(&SessionState) + Send + Sync>;

/// A stored transaction plus the remote write queued for it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub transaction: Transaction,
    pub ticket: Option<WriteTicket>,
}

/// Outcome of a delete: the removed row (if it existed) and its queued remote write.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    pub transaction: Option<Transaction>,
    pub ticket: Option<WriteTicket>,
}

/// Today's date on the local calendar.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Main entry point for the SpendMate core library.
/// Holds the ledger, session state and all services needed to operate on them.
///
/// Every mutation is applied locally first and persisted to the blob store
/// right away. When signed in with a remote store configured, transaction
/// writes are also queued and sent by [`flush_pending`](Self::flush_pending).
#[must_use]
pub struct SpendTracker {
    ledger: Ledger,
    settings: Settings,
    session: SessionState,
    /// User whose transactions, loans and cards are cached; `None` until a
    /// first sign-in adopts local data.
    owner: Option<String>,
    store: Box<dyn BlobStore>,
    remote: Option<Box<dyn RemoteStore>>,
    identity: Option<Box<dyn IdentityProvider>>,
    ledger_service: LedgerService,
    account_service: AccountService,
    aggregation_service: AggregationService,
    budget_service: BudgetService,
    liability_service: LiabilityService,
    export_service: ExportService,
    sync: SyncService,
    session_listeners: Vec<SessionListener>,
}

impl std::fmt::Debug for SpendTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpendTracker")
            .field("transactions", &self.ledger.transactions.len())
            .field("budgets", &self.ledger.budgets.len())
            .field("loans", &self.ledger.loans.len())
            .field("cards", &self.ledger.cards.len())
            .field("settings", &self.settings)
            .field("session", &self.session)
            .field("owner", &self.owner)
            .field("pending_writes", &self.sync.pending_count())
            .finish()
    }
}

impl SpendTracker {
    /// Open a tracker over a local blob store. Missing or malformed collections
    /// load as defaults. Without an identity service the tracker runs local-only.
    pub fn open(store: Box<dyn BlobStore>) -> Self {
        let ledger = StorageManager::load_ledger(store.as_ref());
        let settings = StorageManager::load_settings(store.as_ref());
        let owner = StorageManager::load_owner(store.as_ref());
        tracing::info!(
            transactions = ledger.transactions.len(),
            loans = ledger.loans.len(),
            cards = ledger.cards.len(),
            "ledger loaded"
        );

        Self {
            ledger,
            settings,
            session: SessionState::LocalOnly,
            owner,
            store,
            remote: None,
            identity: None,
            ledger_service: LedgerService::new(),
            account_service: AccountService::new(),
            aggregation_service: AggregationService::new(),
            budget_service: BudgetService::new(),
            liability_service: LiabilityService::new(),
            export_service: ExportService::new(),
            sync: SyncService::new(),
            session_listeners: Vec::new(),
        }
    }

    /// Attach a remote row store for transactions.
    pub fn with_remote(mut self, remote: Box<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Attach an identity service. Transactions stay hidden until a session
    /// is established.
    pub fn with_identity(mut self, identity: Box<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self.session = SessionState::Unknown;
        self
    }

    /// Attach the hosted backend as both row store and identity service.
    pub fn with_supabase(self, config: RemoteConfig) -> Self {
        self.with_remote(Box::new(SupabaseClient::new(config.clone())))
            .with_identity(Box::new(SupabaseClient::new(config)))
    }

    // ── Reading ─────────────────────────────────────────────────────

    /// The full in-memory state, regardless of session.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Transactions visible to the current session (empty without one), newest first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        if self.session.is_active() {
            &self.ledger.transactions
        } else {
            &[]
        }
    }

    #[must_use]
    pub fn get_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions().iter().find(|t| t.id == id)
    }

    /// Visible transactions dated within `month`, newest first.
    #[must_use]
    pub fn month_transactions(&self, month: MonthKey) -> Vec<&Transaction> {
        self.aggregation_service
            .month_transactions(self.transactions(), month)
    }

    /// Total, per-category and daily spend for `month`.
    #[must_use]
    pub fn month_summary(&self, month: MonthKey) -> MonthSummary {
        self.aggregation_service
            .month_summary(self.transactions(), month)
    }

    /// Budget utilisation for `month`.
    #[must_use]
    pub fn budget_statuses(&self, month: MonthKey) -> Vec<BudgetStatus> {
        let spend = self
            .aggregation_service
            .by_category(self.transactions(), month);
        self.budget_service.evaluate(&self.ledger.budgets, &spend)
    }

    /// Categories offered for new transactions.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.budget_service
            .categories(&self.ledger.budgets, self.transactions())
    }

    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        &self.ledger.budgets
    }

    #[must_use]
    pub fn loans(&self) -> &[LoanAccount] {
        &self.ledger.loans
    }

    #[must_use]
    pub fn cards(&self) -> &[CreditCardAccount] {
        &self.ledger.cards
    }

    pub fn loan_projections(&self, today: NaiveDate) -> Result<Vec<LoanProjection>, CoreError> {
        self.liability_service.project_loans(&self.ledger.loans, today)
    }

    pub fn card_projections(&self, today: NaiveDate) -> Result<Vec<CardProjection>, CoreError> {
        self.liability_service.project_cards(&self.ledger.cards, today)
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Create or replace a transaction (see [`LedgerService::upsert`]).
    /// Requires an active session.
    pub fn upsert_transaction(&mut self, draft: &TransactionDraft) -> Result<Saved, CoreError> {
        self.require_active()?;
        let upserted = self.ledger_service.upsert(&mut self.ledger, draft, today())?;
        self.after_upsert(upserted)
    }

    /// Delete a transaction by id; absent ids are a no-op.
    pub fn remove_transaction(&mut self, id: &str) -> Result<Removed, CoreError> {
        self.require_active()?;
        let Some(removed) = self.ledger_service.remove(&mut self.ledger, id) else {
            return Ok(Removed {
                transaction: None,
                ticket: None,
            });
        };
        self.persist(Collection::Transactions)?;
        let ticket = self.enqueue(WriteOp::Delete { id: removed.id.clone() });
        tracing::info!(id, "transaction removed");
        Ok(Removed {
            transaction: Some(removed),
            ticket,
        })
    }

    /// Upsert, then push pending writes to the remote store.
    pub async fn save_transaction(&mut self, draft: &TransactionDraft) -> Result<Saved, CoreError> {
        let saved = self.upsert_transaction(draft)?;
        let commits = self.flush_writes().await?;
        // Hand back the authoritative row when the write committed.
        let transaction = saved
            .ticket
            .and_then(|ticket| commits.iter().find(|(t, _)| *t == ticket))
            .and_then(|(_, id)| self.ledger.transactions.iter().find(|t| &t.id == id))
            .cloned()
            .unwrap_or(saved.transaction);
        Ok(Saved {
            transaction,
            ticket: saved.ticket,
        })
    }

    /// Remove, then push pending writes to the remote store.
    pub async fn delete_transaction(&mut self, id: &str) -> Result<Removed, CoreError> {
        let removed = self.remove_transaction(id)?;
        self.flush_pending().await?;
        Ok(removed)
    }

    // ── Liabilities ─────────────────────────────────────────────────

    pub fn add_loan(&mut self, draft: &LoanDraft) -> Result<String, CoreError> {
        let id = self.account_service.add_loan(&mut self.ledger, draft)?;
        self.persist(Collection::Loans)?;
        Ok(id)
    }

    pub fn update_loan(&mut self, id: &str, draft: &LoanDraft) -> Result<(), CoreError> {
        self.account_service.update_loan(&mut self.ledger, id, draft)?;
        self.persist(Collection::Loans)
    }

    /// Delete a loan. Payment transactions already recorded are kept.
    pub fn remove_loan(&mut self, id: &str) -> Result<Option<LoanAccount>, CoreError> {
        let removed = self.account_service.remove_loan(&mut self.ledger, id);
        if removed.is_some() {
            self.persist(Collection::Loans)?;
        }
        Ok(removed)
    }

    pub fn add_card(&mut self, draft: &CardDraft) -> Result<String, CoreError> {
        let id = self.account_service.add_card(&mut self.ledger, draft)?;
        self.persist(Collection::Cards)?;
        Ok(id)
    }

    pub fn update_card(&mut self, id: &str, draft: &CardDraft) -> Result<(), CoreError> {
        self.account_service.update_card(&mut self.ledger, id, draft)?;
        self.persist(Collection::Cards)
    }

    pub fn remove_card(&mut self, id: &str) -> Result<Option<CreditCardAccount>, CoreError> {
        let removed = self.account_service.remove_card(&mut self.ledger, id);
        if removed.is_some() {
            self.persist(Collection::Cards)?;
        }
        Ok(removed)
    }

    /// Pay down a loan; records a "Loan Payment" transaction.
    pub fn pay_loan(
        &mut self,
        loan_id: &str,
        amount: f64,
        date: NaiveDate,
        note: Option<&str>,
    ) -> Result<Saved, CoreError> {
        self.pay(LiabilityKind::Loan, loan_id, amount, date, note)
    }

    /// Pay down a card; records a "Credit Card Payment" transaction.
    pub fn pay_card(
        &mut self,
        card_id: &str,
        amount: f64,
        date: NaiveDate,
        note: Option<&str>,
    ) -> Result<Saved, CoreError> {
        self.pay(LiabilityKind::Card, card_id, amount, date, note)
    }

    fn pay(
        &mut self,
        kind: LiabilityKind,
        account_id: &str,
        amount: f64,
        date: NaiveDate,
        note: Option<&str>,
    ) -> Result<Saved, CoreError> {
        self.require_active()?;
        let upserted = self.ledger_service.apply_payment(
            &mut self.ledger,
            kind,
            account_id,
            amount,
            date,
            note,
        )?;
        self.persist(match kind {
            LiabilityKind::Loan => Collection::Loans,
            LiabilityKind::Card => Collection::Cards,
        })?;
        self.after_upsert(upserted)
    }

    // ── Budgets & Settings ──────────────────────────────────────────

    pub fn set_budget(&mut self, category: &str, monthly_limit: f64) -> Result<(), CoreError> {
        self.budget_service
            .set_budget(&mut self.ledger, category, monthly_limit)?;
        self.persist(Collection::Budgets)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the display currency (3-letter code). Amounts are not converted.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        self.settings.currency = Settings::normalize_currency(currency)?;
        StorageManager::save_settings(self.store.as_ref(), &self.settings)
    }

    /// Clear transactions, loans and cards and restore the default budgets.
    /// Local only; remote rows are not touched.
    pub fn reset_all(&mut self) -> Result<(), CoreError> {
        self.ledger.transactions.clear();
        self.ledger.loans.clear();
        self.ledger.cards.clear();
        self.ledger.budgets = default_budgets();
        self.sync.clear();
        StorageManager::save_ledger(self.store.as_ref(), &self.ledger)?;
        tracing::info!("all data reset");
        Ok(())
    }

    // ── Export ──────────────────────────────────────────────────────

    /// CSV of every visible transaction, named for `today`.
    pub fn export_csv(&self, today: NaiveDate) -> Result<ExportFile, CoreError> {
        self.export_service.export(self.transactions(), today)
    }

    /// Build the CSV export and hand it to `sink` once.
    pub fn export_to(&self, sink: &dyn ExportSink, today: NaiveDate) -> Result<ExportFile, CoreError> {
        let file = self.export_csv(today)?;
        sink.deliver(&file)?;
        tracing::info!(file = %file.file_name, rows = self.transactions().len(), "transactions exported");
        Ok(file)
    }

    // ── Remote sync ─────────────────────────────────────────────────

    /// Register for pending-write state changes.
    pub fn subscribe_writes(&mut self, listener: WriteListener) -> SubscriptionId {
        self.sync.subscribe(listener)
    }

    pub fn unsubscribe_writes(&mut self, id: SubscriptionId) -> bool {
        self.sync.unsubscribe(id)
    }

    /// State of a write still tracked: pending, or failed until cleared.
    /// Committed writes are dropped at the end of each flush; subscribe to
    /// observe commits.
    #[must_use]
    pub fn write_state(&self, ticket: WriteTicket) -> Option<&WriteState> {
        self.sync.state(ticket)
    }

    #[must_use]
    pub fn pending_write_count(&self) -> usize {
        self.sync.pending_count()
    }

    /// Writes whose remote round trip failed. Their local effect is still applied.
    #[must_use]
    pub fn failed_writes(&self) -> Vec<&PendingWrite> {
        self.sync.failed()
    }

    /// Forget failed writes.
    pub fn clear_settled_writes(&mut self) {
        self.sync.prune_settled();
    }

    /// Send every pending write to the remote store, oldest first.
    ///
    /// A committed write swaps the local row for the authoritative one; a failed
    /// write is marked `Failed` and the local change is kept. Committed writes
    /// are forgotten once the queue is drained. Returns how many writes
    /// committed. Without a remote store or session this does nothing.
    pub async fn flush_pending(&mut self) -> Result<usize, CoreError> {
        Ok(self.flush_writes().await?.len())
    }

    /// Drain the queue; returns the committed tickets with their remote ids.
    async fn flush_writes(&mut self) -> Result<Vec<(WriteTicket, String)>, CoreError> {
        let (Some(remote), Some(session)) = (self.remote.as_deref(), self.session.session().cloned())
        else {
            return Ok(Vec::new());
        };

        let mut committed = Vec::new();
        while let Some(write) = self.sync.next_pending().cloned() {
            let outcome = match &write.op {
                WriteOp::Upsert { transaction, is_new } => {
                    let id = (!is_new).then_some(transaction.id.as_str());
                    remote
                        .upsert_transaction(&session, id, transaction)
                        .await
                        .map(Some)
                }
                WriteOp::Delete { id } => remote.delete_transaction(&session, id).await.map(|_| None),
            };

            match outcome {
                Ok(Some(row)) => {
                    let local_id = write.op.local_id();
                    let row_id = row.id.clone();
                    self.sync.commit(write.ticket, &row_id);
                    // A queued edit or delete of the same row is newer; only adopt the id.
                    let changed = if self.sync.has_pending_for(&row_id) {
                        self.ledger_service.rename(&mut self.ledger, local_id, &row_id)
                    } else {
                        self.ledger_service.reconcile(&mut self.ledger, local_id, row);
                        true
                    };
                    if changed {
                        StorageManager::save(self.store.as_ref(), &self.ledger, Collection::Transactions)?;
                    }
                    committed.push((write.ticket, row_id));
                }
                Ok(None) => {
                    let id = write.op.local_id().to_string();
                    self.sync.commit(write.ticket, &id);
                    committed.push((write.ticket, id));
                }
                Err(e) => {
                    tracing::warn!(ticket = %write.ticket, backend = remote.name(), error = %e, "remote write failed");
                    self.sync.fail(write.ticket, &e);
                }
            }
        }

        self.sync.prune_committed();
        Ok(committed)
    }

    /// Replace local transactions with the signed-in user's remote rows.
    /// On failure local state is left as it was.
    pub async fn refresh_from_remote(&mut self) -> Result<usize, CoreError> {
        let remote = self.remote.as_deref().ok_or(CoreError::NoRemote)?;
        let session = self
            .session
            .session()
            .cloned()
            .ok_or(CoreError::NotAuthenticated)?;

        let rows = remote.list_transactions(&session).await.map_err(|e| {
            tracing::warn!(backend = remote.name(), error = %e, "remote load skipped");
            e
        })?;
        let count = rows.len();
        self.ledger_service.replace_all(&mut self.ledger, rows);
        self.persist(Collection::Transactions)?;
        tracing::info!(count, "transactions loaded from remote");
        Ok(count)
    }

    // ── Session ─────────────────────────────────────────────────────

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn on_session_change(&mut self, listener: SessionListener) {
        self.session_listeners.push(listener);
    }

    /// Apply a session-change notification.
    ///
    /// A confirmed sign-out clears data (memory and the durable transaction,
    /// loan and card blobs), and so does a sign-in by a user other than the
    /// one who owns the cached data. A failed check hides transactions but
    /// keeps everything cached.
    pub fn handle_session_event(&mut self, event: SessionEvent) -> Result<(), CoreError> {
        match event {
            SessionEvent::SignedIn(session) => {
                let user_id = session.user.id.clone();
                tracing::info!(user = %user_id, "signed in");
                if self.owner.as_deref().is_some_and(|owner| owner != user_id) {
                    tracing::info!(user = %user_id, "cached data belongs to another user; clearing");
                    self.clear_session_data()?;
                }
                if self.owner.as_deref() != Some(user_id.as_str()) {
                    StorageManager::save_owner(self.store.as_ref(), &user_id)?;
                    self.owner = Some(user_id);
                }
                self.session = SessionState::SignedIn(session);
            }
            SessionEvent::SignedOut => {
                tracing::info!("signed out; clearing session data");
                self.session = SessionState::SignedOut;
                self.clear_session_data()?;
            }
            SessionEvent::CheckFailed(reason) => {
                tracing::warn!(%reason, "session check failed; keeping cached data");
                self.session = SessionState::Unavailable(reason);
            }
        }
        for listener in &self.session_listeners {
            listener(&self.session);
        }
        Ok(())
    }

    /// Validate a stored session with the identity service.
    pub async fn restore_session(&mut self, session: Session) -> Result<User, CoreError> {
        let identity = self.identity.as_deref().ok_or(CoreError::NoRemote)?;
        match identity.current_user(&session).await {
            Ok(user) => {
                let session = Session {
                    user: user.clone(),
                    ..session
                };
                self.handle_session_event(SessionEvent::SignedIn(session))?;
                self.load_remote_after_sign_in().await;
                Ok(user)
            }
            Err(e) => {
                self.handle_session_event(SessionEvent::CheckFailed(e.to_string()))?;
                Err(e)
            }
        }
    }

    /// Register a new account. Returns `true` when the service signed the user
    /// in straight away, `false` while e-mail confirmation is pending.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<bool, CoreError> {
        let email = Self::require_email(email)?;
        if password.is_empty() {
            return Err(CoreError::ValidationError("Please enter a password".into()));
        }
        let identity = self.identity.as_deref().ok_or(CoreError::NoRemote)?;
        match identity.sign_up(email, password).await? {
            Some(session) => {
                self.handle_session_event(SessionEvent::SignedIn(session))?;
                self.load_remote_after_sign_in().await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<User, CoreError> {
        let email = Self::require_email(email)?;
        let identity = self.identity.as_deref().ok_or(CoreError::NoRemote)?;
        let session = identity.sign_in(email, password).await?;
        let user = session.user.clone();
        self.handle_session_event(SessionEvent::SignedIn(session))?;
        self.load_remote_after_sign_in().await;
        Ok(user)
    }

    /// Sign out with the identity service, then clear session data locally.
    /// A failing remote sign-out is logged; the local sign-out still happens.
    pub async fn sign_out(&mut self) -> Result<(), CoreError> {
        if let (Some(identity), Some(session)) = (self.identity.as_deref(), self.session.session()) {
            if let Err(e) = identity.sign_out(session).await {
                tracing::warn!(error = %e, "remote sign-out failed");
            }
        }
        self.handle_session_event(SessionEvent::SignedOut)
    }

    pub async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), CoreError> {
        let email = Self::require_email(email)?;
        let identity = self.identity.as_deref().ok_or(CoreError::NoRemote)?;
        identity.request_password_reset(email, redirect_to).await
    }

    /// Change the signed-in user's password. Both entries must match and be at
    /// least 8 characters; nothing is sent otherwise.
    pub async fn update_password(&mut self, password: &str, confirm: &str) -> Result<(), CoreError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::ValidationError(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if password != confirm {
            return Err(CoreError::ValidationError("Passwords do not match".into()));
        }
        let identity = self.identity.as_deref().ok_or(CoreError::NoRemote)?;
        let session = self.session.session().ok_or(CoreError::NotAuthenticated)?;
        let user = identity.update_password(session, password).await?;
        if let SessionState::SignedIn(session) = &mut self.session {
            session.user = user;
        }
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn require_active(&self) -> Result<(), CoreError> {
        if self.session.is_active() {
            Ok(())
        } else {
            Err(CoreError::NotAuthenticated)
        }
    }

    fn require_email(email: &str) -> Result<&str, CoreError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CoreError::ValidationError("Enter your email first".into()));
        }
        Ok(email)
    }

    fn persist(&self, collection: Collection) -> Result<(), CoreError> {
        StorageManager::save(self.store.as_ref(), &self.ledger, collection)
    }

    fn after_upsert(&mut self, upserted: Upserted) -> Result<Saved, CoreError> {
        self.persist(Collection::Transactions)?;
        let ticket = self.enqueue(WriteOp::Upsert {
            transaction: upserted.transaction.clone(),
            is_new: upserted.is_new,
        });
        Ok(Saved {
            transaction: upserted.transaction,
            ticket,
        })
    }

    /// Queue a remote write when signed in with a remote store.
    fn enqueue(&mut self, op: WriteOp) -> Option<WriteTicket> {
        if self.remote.is_some() && self.session.session().is_some() {
            Some(self.sync.enqueue(op))
        } else {
            None
        }
    }

    async fn load_remote_after_sign_in(&mut self) {
        if self.remote.is_none() {
            return;
        }
        // Errors are logged inside; the local view stays usable.
        let _ = self.refresh_from_remote().await;
    }

    fn clear_session_data(&mut self) -> Result<(), CoreError> {
        self.ledger.transactions.clear();
        self.ledger.loans.clear();
        self.ledger.cards.clear();
        self.sync.clear();
        self.owner = None;
        StorageManager::clear_session_data(self.store.as_ref())
    }
}
