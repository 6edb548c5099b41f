use super::CoincheckAgency;
use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::types::PaginationParams;
use serde_json::Value;

impl<R: RestClient> CoincheckAgency<R> {
    /// The ticker endpoint covers btc_jpy only; other pairs are served by
    /// the rate endpoint, which returns a buy rate rather than a full
    /// ticker.
    pub(super) async fn ticker(&self, pair: &str) -> Result<Value, AgencyError> {
        if pair == "btc_jpy" {
            self.rest.get_ticker().await
        } else {
            self.rest.get_buy_rate(pair).await
        }
    }

    pub(super) async fn trades(
        &self,
        pair: &str,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        self.rest.get_trades(pair, pagination).await
    }

    pub(super) async fn order_book(&self, pair: &str) -> Result<Value, AgencyError> {
        if pair != "btc_jpy" {
            return Err(AgencyError::InvalidParameters(format!(
                "coincheck order book covers btc_jpy only, got {pair}"
            )));
        }
        self.rest.get_order_book().await
    }

    /// Rate for a hypothetical order, exchange-side calculation.
    pub async fn calc_rate(
        &self,
        pair: &str,
        order_type: &str,
        price: Option<&str>,
        amount: Option<&str>,
    ) -> Result<Value, AgencyError> {
        self.rest.calc_rate(pair, order_type, price, amount).await
    }

    pub async fn get_buy_rate(&self, pair: &str) -> Result<Value, AgencyError> {
        self.rest.get_buy_rate(pair).await
    }
}
