use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Per-agency entry in the application config file.
///
/// The credentials file is referenced by path only: keys never live in the
/// main config, so the main config stays safe to log or commit.
#[derive(Debug, Clone, Deserialize)]
pub struct AgencyConfig {
    pub exchange_name: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

/// Application config: the list of trading agencies to instantiate.
///
/// ```json
/// { "trading_agencies": [
///     { "exchange_name": "coincheck", "base_url": "https://coincheck.com",
///       "credentials_file": "secrets/coincheck.json" }
/// ]}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub trading_agencies: Vec<AgencyConfig>,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if config.trading_agencies.is_empty() {
            return Err(ConfigError::Invalid(
                "config declares no trading agencies".to_string(),
            ));
        }
        Ok(config)
    }

    /// Find an agency entry by its configured exchange name
    /// (case-insensitive).
    pub fn find_agency(&self, exchange_name: &str) -> Option<&AgencyConfig> {
        self.trading_agencies
            .iter()
            .find(|a| a.exchange_name.eq_ignore_ascii_case(exchange_name))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("malformed JSON in {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("unknown exchange: {0}")]
    UnknownExchange(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_agency_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "trading_agencies": [
                {{ "exchange_name": "coincheck",
                   "base_url": "https://coincheck.com",
                   "credentials_file": "secrets/coincheck.json" }},
                {{ "exchange_name": "zaif::trade" }}
            ]}}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.trading_agencies.len(), 2);

        let coincheck = config.find_agency("Coincheck").unwrap();
        assert_eq!(coincheck.base_url.as_deref(), Some("https://coincheck.com"));
        assert!(coincheck.credentials_file.is_some());

        let zaif = config.find_agency("zaif::trade").unwrap();
        assert!(zaif.base_url.is_none());
        assert!(zaif.credentials_file.is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn rejects_empty_agency_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "trading_agencies": [] }}"#).unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            AppConfig::load("/nonexistent/config.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
