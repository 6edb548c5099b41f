use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::types::{OrderKind, OrderRequest, OrderSide};
use crate::exchanges::zaif::endpoints;
use serde_json::Value;

/// Unwrap a tapi envelope. Zaif private responses are
/// `{"success": 1, "return": {...}}` on success and
/// `{"success": 0, "error": "..."}` on failure, both under HTTP 200.
pub fn unwrap_tapi(value: Value) -> Result<Value, AgencyError> {
    match value.get("success").and_then(Value::as_i64) {
        Some(0) => {
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unspecified error")
                .to_string();
            Err(AgencyError::ExchangeLogic { message })
        }
        Some(_) => Ok(value.get("return").cloned().unwrap_or(value)),
        None => Ok(value),
    }
}

/// Form pairs for a tapi `trade` call. Zaif's trade method takes limit
/// orders only; bid buys, ask sells.
pub fn trade_params(order: &OrderRequest) -> Result<Vec<(String, String)>, AgencyError> {
    let action = match order.kind {
        OrderKind::Limit(OrderSide::Buy) => "bid",
        OrderKind::Limit(OrderSide::Sell) => "ask",
        OrderKind::MarketBuy | OrderKind::MarketSell => {
            return Err(AgencyError::InvalidParameters(
                "zaif trade supports limit orders only".to_string(),
            ))
        }
    };
    let price = order.rate.ok_or_else(|| {
        AgencyError::InvalidParameters("zaif trade requires a price".to_string())
    })?;
    let amount = order.amount.ok_or_else(|| {
        AgencyError::InvalidParameters("zaif trade requires an amount".to_string())
    })?;
    Ok(vec![
        ("currency_pair".to_string(), order.pair.clone()),
        ("action".to_string(), action.to_string()),
        ("price".to_string(), price.to_string()),
        ("amount".to_string(), amount.to_string()),
    ])
}

fn encode_form(method: &str, params: &[(String, String)]) -> String {
    let mut body = format!("method={method}");
    for (k, v) in params {
        body.push('&');
        body.push_str(k);
        body.push('=');
        body.push_str(v);
    }
    body
}

/// Thin typed wrapper over [`RestClient`] for the Zaif API. Public reads
/// go to versioned paths; every private operation is a POST to the single
/// tapi endpoint with the operation named in the body. The nonce is added
/// by the signer, never here.
pub struct ZaifRestClient<R: RestClient> {
    client: R,
}

impl<R: RestClient> ZaifRestClient<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &R {
        &self.client
    }

    /// GET a public resource: `/api/1/{resource}/{argument}`.
    pub async fn public(&self, resource: &str, argument: &str) -> Result<Value, AgencyError> {
        if !endpoints::is_public_resource(resource) {
            return Err(AgencyError::InvalidParameters(format!(
                "unknown zaif public resource: {resource}"
            )));
        }
        let path = endpoints::public_path(resource, argument);
        self.client.get(&path, &[], None).await
    }

    /// POST a private tapi method. The credential tier comes from the
    /// method catalog; an uncataloged method never reaches the wire.
    pub async fn tapi(
        &self,
        method: &str,
        params: &[(String, String)],
    ) -> Result<Value, AgencyError> {
        let tier = endpoints::private_tier(method).ok_or_else(|| {
            AgencyError::InvalidParameters(format!("unknown zaif tapi method: {method}"))
        })?;
        let body = encode_form(method, params);
        self.client
            .post(endpoints::TAPI, body.as_bytes(), Some(tier))
            .await
            .and_then(unwrap_tapi)
    }

    // -- public --

    pub async fn get_ticker(&self, pair: &str) -> Result<Value, AgencyError> {
        self.public("ticker", pair).await
    }

    pub async fn get_last_price(&self, pair: &str) -> Result<Value, AgencyError> {
        self.public("last_price", pair).await
    }

    pub async fn get_trades(&self, pair: &str) -> Result<Value, AgencyError> {
        self.public("trades", pair).await
    }

    pub async fn get_depth(&self, pair: &str) -> Result<Value, AgencyError> {
        self.public("depth", pair).await
    }

    pub async fn get_currencies(&self, currency: &str) -> Result<Value, AgencyError> {
        self.public("currencies", currency).await
    }

    pub async fn get_currency_pairs(&self, pair: &str) -> Result<Value, AgencyError> {
        self.public("currency_pairs", pair).await
    }

    // -- private --

    pub async fn get_info(&self) -> Result<Value, AgencyError> {
        self.tapi("get_info", &[]).await
    }

    pub async fn get_info2(&self) -> Result<Value, AgencyError> {
        self.tapi("get_info2", &[]).await
    }

    pub async fn get_personal_info(&self) -> Result<Value, AgencyError> {
        self.tapi("get_personal_info", &[]).await
    }

    pub async fn get_id_info(&self) -> Result<Value, AgencyError> {
        self.tapi("get_id_info", &[]).await
    }

    pub async fn trade_history(
        &self,
        params: &[(String, String)],
    ) -> Result<Value, AgencyError> {
        self.tapi("trade_history", params).await
    }

    pub async fn active_orders(&self, currency_pair: Option<&str>) -> Result<Value, AgencyError> {
        let params: Vec<(String, String)> = currency_pair
            .map(|p| vec![("currency_pair".to_string(), p.to_string())])
            .unwrap_or_default();
        self.tapi("active_orders", &params).await
    }

    pub async fn trade(&self, order: &OrderRequest) -> Result<Value, AgencyError> {
        let params = trade_params(order)?;
        self.tapi("trade", &params).await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, AgencyError> {
        self.tapi(
            "cancel_order",
            &[("order_id".to_string(), order_id.to_string())],
        )
        .await
    }
}
