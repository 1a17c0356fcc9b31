use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::config::RemoteConfig;
use crate::errors::CoreError;
use crate::models::session::{Session, User};
use crate::models::transaction::Transaction;
use super::traits::{IdentityProvider, RemoteStore};

const BACKEND: &str = "Supabase";

/// Table holding one row per transaction, with a `user_id` owner column.
const TABLE: &str = "transactions";

const SELECT_COLUMNS: &str = "id,amount,category,txn_date,note";

/// Hosted Postgres (REST) + auth service client.
///
/// - **Rows**: `/rest/v1/transactions`, filtered by `user_id` and protected by
///   row-level security on the server.
/// - **Auth**: `/auth/v1/*` (sign-up, password grant, logout, recover, user).
/// - Every request carries the anon key; row and user requests also carry the
///   session's access token.
pub struct SupabaseClient {
    client: Client,
    config: RemoteConfig,
}

impl SupabaseClient {
    pub fn new(config: RemoteConfig) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    fn rest_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.config.base_url)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.base_url)
    }

    fn with_key(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.config.anon_key)
    }

    fn with_session(&self, req: RequestBuilder, session: &Session) -> RequestBuilder {
        self.with_key(req).bearer_auth(&session.access_token)
    }

    /// Turn a non-2xx response into `CoreError::Api` with the server's message.
    async fn check(resp: Response, what: &str) -> Result<Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(CoreError::Api {
            backend: BACKEND.into(),
            message: format!("{what} failed ({status}): {}", error_message(&body)),
        })
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct RowPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    user_id: &'a str,
    amount: f64,
    category: &'a str,
    txn_date: NaiveDate,
    note: &'a str,
}

#[derive(Deserialize)]
struct Row {
    id: String,
    #[serde(deserialize_with = "numeric")]
    amount: f64,
    category: String,
    txn_date: NaiveDate,
    #[serde(default)]
    note: Option<String>,
}

impl From<Row> for Transaction {
    fn from(row: Row) -> Self {
        Transaction {
            id: row.id,
            amount: row.amount,
            category: row.category,
            date: row.txn_date,
            note: row.note.filter(|n| !n.is_empty()),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: UserResponse,
}

#[derive(Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserResponse> for User {
    fn from(u: UserResponse) -> Self {
        User {
            id: u.id,
            email: u.email,
        }
    }
}

impl From<TokenResponse> for Session {
    fn from(t: TokenResponse) -> Self {
        Session {
            user: t.user.into(),
            access_token: t.access_token,
            refresh_token: t.refresh_token,
        }
    }
}

/// Postgres `numeric` may arrive as a JSON number or a string.
fn numeric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
    }

    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Pull a readable message out of an error body (`msg`, `message`,
/// `error_description` or `error`), falling back to the raw text.
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()))
        })
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

fn parse_error(what: &str, e: impl std::fmt::Display) -> CoreError {
    CoreError::Api {
        backend: BACKEND.into(),
        message: format!("Failed to parse {what} response: {e}"),
    }
}

// ── Row store ───────────────────────────────────────────────────────

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RemoteStore for SupabaseClient {
    fn name(&self) -> &str {
        BACKEND
    }

    async fn list_transactions(&self, session: &Session) -> Result<Vec<Transaction>, CoreError> {
        let owner = format!("eq.{}", session.user.id);
        let req = self.client.get(self.rest_url()).query(&[
            ("select", SELECT_COLUMNS),
            ("user_id", owner.as_str()),
            ("order", "txn_date.desc"),
        ]);

        let resp = self.with_session(req, session).send().await?;
        let rows: Vec<Row> = Self::check(resp, "List transactions")
            .await?
            .json()
            .await
            .map_err(|e| parse_error("list", e))?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn upsert_transaction(
        &self,
        session: &Session,
        id: Option<&str>,
        transaction: &Transaction,
    ) -> Result<Transaction, CoreError> {
        let payload = RowPayload {
            id,
            user_id: &session.user.id,
            amount: transaction.amount,
            category: &transaction.category,
            txn_date: transaction.date,
            note: transaction.note.as_deref().unwrap_or(""),
        };

        let req = self
            .client
            .post(self.rest_url())
            .query(&[("select", "*")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&payload);

        let resp = self.with_session(req, session).send().await?;
        let mut rows: Vec<Row> = Self::check(resp, "Save transaction")
            .await?
            .json()
            .await
            .map_err(|e| parse_error("upsert", e))?;

        if rows.is_empty() {
            return Err(CoreError::Api {
                backend: BACKEND.into(),
                message: "Save transaction returned no row".into(),
            });
        }
        Ok(rows.swap_remove(0).into())
    }

    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<(), CoreError> {
        let by_id = format!("eq.{id}");
        let owner = format!("eq.{}", session.user.id);
        let req = self
            .client
            .delete(self.rest_url())
            .query(&[("id", by_id.as_str()), ("user_id", owner.as_str())]);

        let resp = self.with_session(req, session).send().await?;
        Self::check(resp, "Delete transaction").await?;
        Ok(())
    }
}

// ── Identity ────────────────────────────────────────────────────────

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl IdentityProvider for SupabaseClient {
    fn name(&self) -> &str {
        BACKEND
    }

    async fn current_user(&self, session: &Session) -> Result<User, CoreError> {
        let req = self.client.get(self.auth_url("user"));
        let resp = self.with_session(req, session).send().await?;
        let user: UserResponse = Self::check(resp, "Get user")
            .await?
            .json()
            .await
            .map_err(|e| parse_error("user", e))?;
        Ok(user.into())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, CoreError> {
        let req = self
            .client
            .post(self.auth_url("signup"))
            .json(&serde_json::json!({ "email": email, "password": password }));
        let resp = self.with_key(req).send().await?;
        let body: serde_json::Value = Self::check(resp, "Sign up")
            .await?
            .json()
            .await
            .map_err(|e| parse_error("sign-up", e))?;

        // Without auto-confirm the service returns only the user, no tokens.
        if body.get("access_token").is_none() {
            return Ok(None);
        }
        let token: TokenResponse =
            serde_json::from_value(body).map_err(|e| parse_error("sign-up", e))?;
        Ok(Some(token.into()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        let req = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }));
        let resp = self.with_key(req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoreError::Auth(error_message(&body)));
        }
        let token: TokenResponse = resp.json().await.map_err(|e| parse_error("sign-in", e))?;
        Ok(token.into())
    }

    async fn sign_out(&self, session: &Session) -> Result<(), CoreError> {
        let req = self.client.post(self.auth_url("logout"));
        let resp = self.with_session(req, session).send().await?;
        Self::check(resp, "Sign out").await?;
        Ok(())
    }

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), CoreError> {
        let mut req = self
            .client
            .post(self.auth_url("recover"))
            .json(&serde_json::json!({ "email": email }));
        if let Some(redirect) = redirect_to {
            req = req.query(&[("redirect_to", redirect)]);
        }
        let resp = self.with_key(req).send().await?;
        Self::check(resp, "Password reset").await?;
        Ok(())
    }

    async fn update_password(
        &self,
        session: &Session,
        new_password: &str,
    ) -> Result<User, CoreError> {
        let req = self
            .client
            .put(self.auth_url("user"))
            .json(&serde_json::json!({ "password": new_password }));
        let resp = self.with_session(req, session).send().await?;
        let user: UserResponse = Self::check(resp, "Update password")
            .await?
            .json()
            .await
            .map_err(|e| parse_error("user", e))?;
        Ok(user.into())
    }
}
