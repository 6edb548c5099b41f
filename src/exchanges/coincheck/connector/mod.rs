mod account;
mod market_data;
mod trading;

use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::traits::TradingAgency;
use crate::core::types::{OrderRequest, PaginationParams};
use crate::exchanges::coincheck::endpoints;
use crate::exchanges::coincheck::rest::CoincheckRestClient;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

/// Coincheck trading agency. Generic over the transport so tests can
/// substitute a recording client.
pub struct CoincheckAgency<R: RestClient> {
    pub(super) rest: CoincheckRestClient<R>,
    pub(super) base_url: String,
}

impl<R: RestClient> CoincheckAgency<R> {
    pub fn new(client: R, base_url: String) -> Self {
        Self {
            rest: CoincheckRestClient::new(client),
            base_url,
        }
    }
}

/// Flatten a JSON object into query/form pairs. Strings pass through
/// unquoted; numbers and booleans use their JSON text.
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

#[async_trait]
impl<R: RestClient> TradingAgency for CoincheckAgency<R> {
    fn exchange_name(&self) -> &str {
        "coincheck"
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
        let spec = endpoints::lookup(method, command).ok_or_else(|| {
            AgencyError::InvalidParameters(format!("unknown coincheck command: {method} {command}"))
        })?;
        if spec.tier.is_some() {
            return Err(AgencyError::InvalidParameters(format!(
                "{command} is a signed endpoint, use execute"
            )));
        }
        self.dispatch(spec, params).await
    }

    async fn execute(
        &self,
        method: &str,
        command: &str,
        params: &Value,
    ) -> Result<Value, AgencyError> {
        let spec = endpoints::lookup(method, command).ok_or_else(|| {
            AgencyError::InvalidParameters(format!("unknown coincheck command: {method} {command}"))
        })?;
        if spec.tier.is_none() {
            return Err(AgencyError::InvalidParameters(format!(
                "{command} is a public endpoint, use query"
            )));
        }
        self.dispatch(spec, params).await
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
        self.order_book(pair).await
    }

    async fn new_order(&self, order: &OrderRequest) -> Result<Value, AgencyError> {
        self.place_order(order).await
    }

    async fn cancel_order(&self, order_id: &str) -> Result<Value, AgencyError> {
        self.rest.cancel_order(order_id).await
    }

    async fn get_open_orders(&self, _pair: Option<&str>) -> Result<Value, AgencyError> {
        // The opens endpoint has no pair filter; it returns all open orders.
        self.rest.get_open_orders().await
    }

    async fn get_order_history(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        self.rest.get_order_history(pagination).await
    }

    async fn get_balance(&self) -> Result<Value, AgencyError> {
        self.rest.get_balance().await
    }
}

impl<R: RestClient> CoincheckAgency<R> {
    async fn dispatch(
        &self,
        spec: endpoints::EndpointSpec,
        params: &Value,
    ) -> Result<Value, AgencyError> {
        use crate::exchanges::coincheck::rest::check_success;

        let mut pairs = params_to_pairs(params)?;
        match spec.method {
            "GET" => {
                // The rate endpoint takes its pair as a path segment, not a
                // query parameter.
                let mut path = spec.path.to_string();
                if spec.path == endpoints::RATE {
                    let pos = pairs.iter().position(|(k, _)| k == "pair").ok_or_else(|| {
                        AgencyError::InvalidParameters(
                            "rate requires a pair parameter".to_string(),
                        )
                    })?;
                    let (_, pair) = pairs.remove(pos);
                    path = format!("{}/{pair}", endpoints::RATE);
                }
                let refs: Vec<(&str, &str)> = pairs
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                self.rest
                    .inner()
                    .get(&path, &refs, spec.tier)
                    .await
                    .and_then(check_success)
            }
            "POST" => {
                let body = pairs
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("&");
                self.rest
                    .inner()
                    .post(spec.path, body.as_bytes(), spec.tier)
                    .await
                    .and_then(check_success)
            }
            other => Err(AgencyError::InvalidParameters(format!(
                "unsupported method in catalog: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn params_flatten_scalars() {
        let pairs = params_to_pairs(&json!({"pair": "btc_jpy", "limit": 5, "flag": true})).unwrap();
        assert!(pairs.contains(&("pair".to_string(), "btc_jpy".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "5".to_string())));
        assert!(pairs.contains(&("flag".to_string(), "true".to_string())));
    }

    #[test]
    fn nested_params_are_rejected() {
        assert!(params_to_pairs(&json!({"nested": {"a": 1}})).is_err());
        assert!(params_to_pairs(&json!([1, 2])).is_err());
    }

    #[test]
    fn null_params_mean_empty() {
        assert!(params_to_pairs(&Value::Null).unwrap().is_empty());
    }
}
