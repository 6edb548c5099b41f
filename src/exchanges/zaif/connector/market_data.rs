use super::ZaifAgency;
use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::types::PaginationParams;
use serde_json::Value;

impl<R: RestClient> ZaifAgency<R> {
    pub(super) async fn ticker(&self, pair: &str) -> Result<Value, AgencyError> {
        self.rest.get_ticker(pair).await
    }

    /// The public trades feed has no paging; it always returns the most
    /// recent trades.
    pub(super) async fn trades(
        &self,
        pair: &str,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        if pagination.is_some() {
            return Err(AgencyError::InvalidParameters(
                "zaif public trades do not support pagination".to_string(),
            ));
        }
        self.rest.get_trades(pair).await
    }

    pub async fn get_last_price(&self, pair: &str) -> Result<Value, AgencyError> {
        self.rest.get_last_price(pair).await
    }

    pub async fn get_currencies(&self, currency: &str) -> Result<Value, AgencyError> {
        self.rest.get_currencies(currency).await
    }

    pub async fn get_currency_pairs(&self, pair: &str) -> Result<Value, AgencyError> {
        self.rest.get_currency_pairs(pair).await
    }
}
