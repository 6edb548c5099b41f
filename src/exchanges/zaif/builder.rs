use crate::core::config::AgencyConfig;
use crate::core::credentials::CredentialStore;
use crate::core::errors::AgencyError;
use crate::core::kernel::{NonceSource, ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::zaif::connector::ZaifAgency;
use crate::exchanges::zaif::endpoints;
use crate::exchanges::zaif::signer::ZaifSigner;
use std::sync::Arc;

/// Build a Zaif agency from its config entry. Without a credentials file
/// the agency still works for public market data; any signed call fails
/// with `MissingCredentials`.
pub fn build_zaif(config: &AgencyConfig) -> Result<ZaifAgency<ReqwestRest>, AgencyError> {
    let credentials = match &config.credentials_file {
        Some(path) => CredentialStore::load(path)?,
        None => CredentialStore::empty(),
    };

    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| endpoints::DEFAULT_BASE_URL.to_string());

    let signer = ZaifSigner::new(Arc::new(credentials), Arc::new(NonceSource::new()));

    let rest_config = RestClientConfig::new(base_url.clone(), "zaif".to_string());
    let client = RestClientBuilder::new(rest_config)
        .with_signer(Arc::new(signer))
        .build()?;

    Ok(ZaifAgency::new(client, base_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::TradingAgency;

    #[test]
    fn builds_with_catalog_default_base_url() {
        let config = AgencyConfig {
            exchange_name: "zaif::trade".to_string(),
            base_url: None,
            credentials_file: None,
        };
        let agency = build_zaif(&config).unwrap();
        assert_eq!(agency.exchange_name(), "zaif");
        assert_eq!(agency.base_url(), "https://api.zaif.jp");
    }
}
