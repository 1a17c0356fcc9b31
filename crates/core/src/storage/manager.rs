use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::ledger::{Collection, Ledger};
use crate::models::settings::Settings;

use super::blob::BlobStore;

/// Storage key of the display settings.
pub const SETTINGS_KEY: &str = "spendmate_settings_v1";

/// Storage key of the id of the user who owns the cached transactions, loans
/// and cards.
pub const OWNER_KEY: &str = "spendmate_owner_v1";

/// High-level storage operations: load/save the ledger collections and
/// settings as JSON blobs under their fixed keys.
pub struct StorageManager;

impl StorageManager {
    /// Load every collection. Missing or malformed blobs fall back to the
    /// default collection; this never fails.
    pub fn load_ledger(store: &dyn BlobStore) -> Ledger {
        let defaults = Ledger::default();
        Ledger {
            transactions: Self::load_or(store, Collection::Transactions.key(), defaults.transactions),
            budgets: Self::load_or(store, Collection::Budgets.key(), defaults.budgets),
            loans: Self::load_or(store, Collection::Loans.key(), defaults.loans),
            cards: Self::load_or(store, Collection::Cards.key(), defaults.cards),
        }
    }

    pub fn load_settings(store: &dyn BlobStore) -> Settings {
        Self::load_or(store, SETTINGS_KEY, Settings::default())
    }

    /// Serialize one collection of the ledger and write it as a whole.
    pub fn save(
        store: &dyn BlobStore,
        ledger: &Ledger,
        collection: Collection,
    ) -> Result<(), CoreError> {
        let json = match collection {
            Collection::Transactions => Self::to_json(&ledger.transactions)?,
            Collection::Budgets => Self::to_json(&ledger.budgets)?,
            Collection::Loans => Self::to_json(&ledger.loans)?,
            Collection::Cards => Self::to_json(&ledger.cards)?,
        };
        store.set(collection.key(), &json)?;
        tracing::debug!(%collection, bytes = json.len(), "collection saved");
        Ok(())
    }

    pub fn save_settings(store: &dyn BlobStore, settings: &Settings) -> Result<(), CoreError> {
        store.set(SETTINGS_KEY, &Self::to_json(settings)?)
    }

    /// Save the four ledger collections.
    pub fn save_ledger(store: &dyn BlobStore, ledger: &Ledger) -> Result<(), CoreError> {
        for collection in Collection::ALL {
            Self::save(store, ledger, collection)?;
        }
        Ok(())
    }

    /// User id recorded by [`save_owner`](Self::save_owner), if any.
    pub fn load_owner(store: &dyn BlobStore) -> Option<String> {
        Self::load_or::<Option<String>>(store, OWNER_KEY, None).filter(|id| !id.is_empty())
    }

    pub fn save_owner(store: &dyn BlobStore, user_id: &str) -> Result<(), CoreError> {
        store.set(OWNER_KEY, &Self::to_json(user_id)?)
    }

    /// Remove the per-user blobs (transactions, loans, cards) and the owner
    /// marker. Budgets and settings are not user data and stay.
    pub fn clear_session_data(store: &dyn BlobStore) -> Result<(), CoreError> {
        for collection in Collection::USER_OWNED {
            store.remove(collection.key())?;
        }
        store.remove(OWNER_KEY)
    }

    fn load_or<T: DeserializeOwned>(store: &dyn BlobStore, key: &str, default: T) -> T {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read collection, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed collection, using default");
                default
            }
        }
    }

    fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CoreError> {
        serde_json::to_string(value)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize collection: {e}")))
    }
}
