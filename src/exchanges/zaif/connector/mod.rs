mod account;
mod market_data;
mod trading;

use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::traits::TradingAgency;
use crate::core::types::{OrderRequest, PaginationParams};
use crate::exchanges::zaif::endpoints;
use crate::exchanges::zaif::rest::ZaifRestClient;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

/// Zaif trading agency. Generic over the transport so tests can
/// substitute a recording client.
pub struct ZaifAgency<R: RestClient> {
    pub(super) rest: ZaifRestClient<R>,
    pub(super) base_url: String,
}

impl<R: RestClient> ZaifAgency<R> {
    pub fn new(client: R, base_url: String) -> Self {
        Self {
            rest: ZaifRestClient::new(client),
            base_url,
        }
    }
}

/// Flatten a JSON object into form pairs for a tapi call.
pub(super) fn params_to_pairs(params: &Value) -> Result<Vec<(String, String)>, AgencyError> {
    match params {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(AgencyError::InvalidParameters(format!(
                            "parameter {k} must be a scalar, got {other}"
                        )))
                    }
                };
                Ok((k.clone(), text))
            })
            .collect(),
        other => Err(AgencyError::InvalidParameters(format!(
            "params must be a JSON object or null, got {other}"
        ))),
    }
}

/// The path argument of a public call: `argument`, `pair`, or `currency`,
/// whichever the caller supplied.
fn public_argument(params: &Value) -> Result<String, AgencyError> {
    for key in ["argument", "pair", "currency_pair", "currency"] {
        if let Some(arg) = params.get(key).and_then(Value::as_str) {
            return Ok(arg.to_string());
        }
    }
    Err(AgencyError::InvalidParameters(
        "public zaif calls need an argument (pair or currency)".to_string(),
    ))
}

#[async_trait]
impl<R: RestClient> TradingAgency for ZaifAgency<R> {
    fn exchange_name(&self) -> &str {
        "zaif"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn minimum_order_amount(&self, pair: &str) -> Decimal {
        endpoints::minimum_order_amount(pair)
    }

    async fn query(
        &self,
        method: &str,
        command: &str,
        params: &Value,
    ) -> Result<Value, AgencyError> {
        if !method.eq_ignore_ascii_case("GET") {
            return Err(AgencyError::InvalidParameters(format!(
                "zaif public endpoints are GET only, got {method}"
            )));
        }
        if !endpoints::is_public_resource(command) {
            return Err(AgencyError::InvalidParameters(format!(
                "unknown zaif command: {command}"
            )));
        }
        let argument = public_argument(params)?;
        self.rest.public(command, &argument).await
    }

    async fn execute(
        &self,
        method: &str,
        command: &str,
        params: &Value,
    ) -> Result<Value, AgencyError> {
        if !method.eq_ignore_ascii_case("POST") {
            return Err(AgencyError::InvalidParameters(format!(
                "zaif private endpoints are POST only, got {method}"
            )));
        }
        let pairs = params_to_pairs(params)?;
        self.rest.tapi(command, &pairs).await
    }

    async fn get_ticker(&self, pair: &str) -> Result<Value, AgencyError> {
        self.ticker(pair).await
    }

    async fn get_trades(
        &self,
        pair: &str,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        self.trades(pair, pagination).await
    }

    async fn get_order_book(&self, pair: &str) -> Result<Value, AgencyError> {
        self.rest.get_depth(pair).await
    }

    async fn new_order(&self, order: &OrderRequest) -> Result<Value, AgencyError> {
        self.place_order(order).await
    }

    async fn cancel_order(&self, order_id: &str) -> Result<Value, AgencyError> {
        self.rest.cancel_order(order_id).await
    }

    async fn get_open_orders(&self, pair: Option<&str>) -> Result<Value, AgencyError> {
        self.rest.active_orders(pair).await
    }

    async fn get_order_history(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        self.history(pagination).await
    }

    async fn get_balance(&self) -> Result<Value, AgencyError> {
        self.rest.get_info2().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn argument_accepts_common_keys() {
        assert_eq!(public_argument(&json!({"pair": "btc_jpy"})).unwrap(), "btc_jpy");
        assert_eq!(public_argument(&json!({"currency": "btc"})).unwrap(), "btc");
        assert_eq!(public_argument(&json!({"argument": "all"})).unwrap(), "all");
        assert!(public_argument(&json!({})).is_err());
    }
}
