use crate::core::config::ConfigError;
use crate::core::errors::AgencyError;
use crate::core::types::CredentialTier;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::Path;

/// One API key/secret pair. Key material is held behind
/// [`secrecy::Secret`], so it is redacted from `Debug` output and the
/// backing memory is zeroized on drop rather than left to the allocator.
pub struct ApiCredentials {
    api_key: Secret<String>,
    api_secret: Secret<String>,
}

impl ApiCredentials {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            api_secret: Secret::new(api_secret),
        }
    }

    /// Expose the API key for header construction. Handle with care.
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Expose the API secret for HMAC keying. Handle with care.
    pub fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
struct CredentialsEntry {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    api_secret: String,
}

#[derive(Deserialize, Default)]
struct CredentialsFile {
    query: Option<CredentialsEntry>,
    trade: Option<CredentialsEntry>,
    withdraw: Option<CredentialsEntry>,
}

impl CredentialsEntry {
    fn into_credentials(self) -> Option<ApiCredentials> {
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            return None;
        }
        Some(ApiCredentials::new(self.api_key, self.api_secret))
    }
}

/// Three independent credential pairs keyed by privilege tier.
///
/// Populated once from the credentials file, read-only afterwards, safe to
/// share behind an `Arc` without locking. Tier lookup is a pure read and
/// never promotes one tier to satisfy a request for another.
#[derive(Debug, Default)]
pub struct CredentialStore {
    query: Option<ApiCredentials>,
    trade: Option<ApiCredentials>,
    withdraw: Option<ApiCredentials>,
}

impl CredentialStore {
    /// A store with no credentials; every `get` fails. Used for agencies
    /// restricted to public market data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a credentials file:
    /// `{ "query": {"api_key": "...", "api_secret": "..."}, "trade": ..., "withdraw": ... }`.
    /// Tiers absent from the file (or with blank keys) are left unset.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: CredentialsFile =
            serde_json::from_str(&text).map_err(|e| ConfigError::Malformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self {
            query: file.query.and_then(CredentialsEntry::into_credentials),
            trade: file.trade.and_then(CredentialsEntry::into_credentials),
            withdraw: file.withdraw.and_then(CredentialsEntry::into_credentials),
        })
    }

    pub fn insert(&mut self, tier: CredentialTier, api_key: String, api_secret: String) {
        let slot = match tier {
            CredentialTier::Query => &mut self.query,
            CredentialTier::Trade => &mut self.trade,
            CredentialTier::Withdraw => &mut self.withdraw,
        };
        *slot = Some(ApiCredentials::new(api_key, api_secret));
    }

    /// Look up exactly the requested tier.
    pub fn get(&self, tier: CredentialTier) -> Result<&ApiCredentials, AgencyError> {
        let slot = match tier {
            CredentialTier::Query => &self.query,
            CredentialTier::Trade => &self.trade,
            CredentialTier::Withdraw => &self.withdraw,
        };
        slot.as_ref()
            .ok_or(AgencyError::MissingCredentials { tier })
    }

    pub fn has(&self, tier: CredentialTier) -> bool {
        self.get(tier).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.trade.is_none() && self.withdraw.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn round_trips_all_three_tiers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "query":    {{ "api_key": "qk", "api_secret": "qs" }},
                "trade":    {{ "api_key": "tk", "api_secret": "ts" }},
                "withdraw": {{ "api_key": "wk", "api_secret": "ws" }}
            }}"#
        )
        .unwrap();

        let store = CredentialStore::load(file.path()).unwrap();
        for (tier, key, secret) in [
            (CredentialTier::Query, "qk", "qs"),
            (CredentialTier::Trade, "tk", "ts"),
            (CredentialTier::Withdraw, "wk", "ws"),
        ] {
            let creds = store.get(tier).unwrap();
            assert_eq!(creds.api_key(), key);
            assert_eq!(creds.api_secret(), secret);
        }
    }

    #[test]
    fn omitted_tier_fails_fast() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "query": {{ "api_key": "qk", "api_secret": "qs" }} }}"#
        )
        .unwrap();

        let store = CredentialStore::load(file.path()).unwrap();
        assert!(store.has(CredentialTier::Query));
        assert!(matches!(
            store.get(CredentialTier::Trade),
            Err(AgencyError::MissingCredentials {
                tier: CredentialTier::Trade
            })
        ));
        assert!(matches!(
            store.get(CredentialTier::Withdraw),
            Err(AgencyError::MissingCredentials {
                tier: CredentialTier::Withdraw
            })
        ));
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "trade": {{ "api_key": "", "api_secret": "" }} }}"#
        )
        .unwrap();

        let store = CredentialStore::load(file.path()).unwrap();
        assert!(!store.has(CredentialTier::Trade));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = ApiCredentials::new("key".to_string(), "hunter2".to_string());
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
