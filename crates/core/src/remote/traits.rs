use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::session::{Session, User};
use crate::models::transaction::Transaction;

/// Per-user row store for transactions (hosted database with row-level isolation).
///
/// Implementations scope every call to the session's user; the core never sees
/// another user's rows.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RemoteStore: Send + Sync {
    /// Human-readable backend name (for logs/errors).
    fn name(&self) -> &str;

    /// All of the user's transactions, newest date first.
    async fn list_transactions(&self, session: &Session) -> Result<Vec<Transaction>, CoreError>;

    /// Insert (`id: None`) or replace a row and return it as stored.
    async fn upsert_transaction(
        &self,
        session: &Session,
        id: Option<&str>,
        transaction: &Transaction,
    ) -> Result<Transaction, CoreError>;

    /// Delete the row with `id` owned by the session's user.
    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<(), CoreError>;
}

/// Hosted identity service. Sign-in state is owned by the service; the core
/// only keeps the returned session.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait IdentityProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Resolve the user behind a stored session (fails if it expired or was revoked).
    async fn current_user(&self, session: &Session) -> Result<User, CoreError>;

    /// Register. Returns `None` while e-mail confirmation is pending.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, CoreError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError>;

    async fn sign_out(&self, session: &Session) -> Result<(), CoreError>;

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), CoreError>;

    async fn update_password(&self, session: &Session, new_password: &str)
        -> Result<User, CoreError>;
}
