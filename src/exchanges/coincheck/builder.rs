use crate::core::config::AgencyConfig;
use crate::core::credentials::CredentialStore;
use crate::core::errors::AgencyError;
use crate::core::kernel::{NonceSource, ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::coincheck::connector::CoincheckAgency;
use crate::exchanges::coincheck::endpoints;
use crate::exchanges::coincheck::signer::CoincheckSigner;
use std::sync::Arc;

/// Build a Coincheck agency from its config entry. Without a credentials
/// file the agency still works for public market data; any signed call
/// fails with `MissingCredentials`.
pub fn build_coincheck(config: &AgencyConfig) -> Result<CoincheckAgency<ReqwestRest>, AgencyError> {
    let credentials = match &config.credentials_file {
        Some(path) => CredentialStore::load(path)?,
        None => CredentialStore::empty(),
    };

    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| endpoints::DEFAULT_BASE_URL.to_string());

    let signer = CoincheckSigner::new(Arc::new(credentials), Arc::new(NonceSource::new()));

    let rest_config = RestClientConfig::new(base_url.clone(), "coincheck".to_string());
    let client = RestClientBuilder::new(rest_config)
        .with_signer(Arc::new(signer))
        .build()?;

    Ok(CoincheckAgency::new(client, base_url))
}
