use crate::core::types::CredentialTier;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgencyError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),

    #[error("Missing {tier} credentials")]
    MissingCredentials { tier: CredentialTier },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Exchange rejected the request: {message}")]
    ExchangeLogic { message: String },

    #[error("Response parse error: {message}")]
    Parse {
        message: String,
        /// Raw response bytes, kept for diagnostics. Exchanges occasionally
        /// return HTML error pages instead of JSON during outages.
        raw: Vec<u8>,
    },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

impl AgencyError {
    /// Whether the error was raised before any request left the process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::MissingCredentials { .. } | Self::InvalidParameters(_)
        )
    }

    /// Process exit code for the CLI: one code per error kind so scripts
    /// can tell "no credentials" from "exchange said no".
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::MissingCredentials { .. } | Self::Auth(_) => 3,
            Self::Transport { .. } => 4,
            Self::HttpStatus { .. } => 5,
            Self::ExchangeLogic { .. } => 6,
            Self::Parse { .. } => 7,
            Self::InvalidParameters(_) => 8,
        }
    }
}

impl From<reqwest::Error> for AgencyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}
