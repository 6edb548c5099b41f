use crate::core::config::{AgencyConfig, AppConfig, ConfigError};
use crate::core::errors::AgencyError;
use crate::core::traits::TradingAgency;
use crate::exchanges::coincheck::build_coincheck;
use crate::exchanges::zaif::build_zaif;
use tracing::trace;

/// Exchange names with an implementation behind them. The set is sealed:
/// an unknown name is a configuration error, never a silent fallback to
/// some generic agency.
pub const SUPPORTED_EXCHANGES: &[&str] = &["coincheck", "zaif"];

/// The registry key for a configured name. Names may carry a role suffix
/// (`zaif::trade`, `coincheck::readonly`); only the prefix before `::`
/// selects the implementation.
fn registry_key(exchange_name: &str) -> &str {
    exchange_name
        .split_once("::")
        .map_or(exchange_name, |(prefix, _)| prefix)
}

/// Instantiate the agency a config entry names.
pub fn create_agency(config: &AgencyConfig) -> Result<Box<dyn TradingAgency>, AgencyError> {
    let key = registry_key(&config.exchange_name).to_ascii_lowercase();
    trace!(exchange = %config.exchange_name, key = %key, "creating trading agency");
    match key.as_str() {
        "coincheck" => Ok(Box::new(build_coincheck(config)?)),
        "zaif" => Ok(Box::new(build_zaif(config)?)),
        _ => Err(AgencyError::Config(ConfigError::UnknownExchange(
            config.exchange_name.clone(),
        ))),
    }
}

/// Instantiate every agency the app config declares. Fails on the first
/// bad entry so a typo is caught at startup, not at first use.
pub fn create_all(config: &AppConfig) -> Result<Vec<Box<dyn TradingAgency>>, AgencyError> {
    config.trading_agencies.iter().map(create_agency).collect()
}
