use serde::{Deserialize, Serialize};

/// Environment variable holding the hosted backend's base URL.
pub const URL_ENV: &str = "SPENDMATE_SUPABASE_URL";

/// Environment variable holding the backend's public (anon) API key.
pub const ANON_KEY_ENV: &str = "SPENDMATE_SUPABASE_ANON_KEY";

/// Connection settings for the hosted database and identity service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// e.g. `https://xyzcompany.supabase.co` (no trailing slash)
    pub base_url: String,
    pub anon_key: String,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            anon_key: anon_key.into().trim().to_string(),
        }
    }

    /// Read both variables; `None` unless both are set and non-blank, in which
    /// case the tracker runs local-only.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let url = lookup(URL_ENV).filter(|v| !v.trim().is_empty())?;
        let key = lookup(ANON_KEY_ENV).filter(|v| !v.trim().is_empty())?;
        Some(Self::new(url, key))
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_url", &self.base_url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}
