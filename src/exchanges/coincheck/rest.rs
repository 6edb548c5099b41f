use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::types::{CredentialTier, OrderKind, OrderRequest, PaginationParams};
use crate::exchanges::coincheck::endpoints;
use serde_json::Value;

/// Reject a 2xx body the exchange itself marks as failed. Coincheck private
/// endpoints return `{"success": false, "error": "..."}` with HTTP 200; an
/// HTTP-level check alone would misread that as a placed order.
pub fn check_success(value: Value) -> Result<Value, AgencyError> {
    if let Some(false) = value.get("success").and_then(Value::as_bool) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unspecified error")
            .to_string();
        return Err(AgencyError::ExchangeLogic { message });
    }
    Ok(value)
}

/// Form-encode a new-order body the way Coincheck documents it. Limit
/// orders carry rate and amount; `market_buy` spends a quote amount;
/// `market_sell` sells a base amount.
pub fn encode_order_body(order: &OrderRequest) -> Result<String, AgencyError> {
    let kind = order.kind.as_str();
    match order.kind {
        OrderKind::Limit(_) => {
            let rate = order.rate.ok_or_else(|| {
                AgencyError::InvalidParameters("limit order requires a rate".to_string())
            })?;
            let amount = order.amount.ok_or_else(|| {
                AgencyError::InvalidParameters("limit order requires an amount".to_string())
            })?;
            Ok(format!(
                "pair={}&order_type={}&rate={}&amount={}",
                order.pair, kind, rate, amount
            ))
        }
        OrderKind::MarketBuy => {
            let quote = order.rate.ok_or_else(|| {
                AgencyError::InvalidParameters("market_buy requires a quote amount".to_string())
            })?;
            Ok(format!(
                "pair={}&order_type={}&market_buy_amount={}",
                order.pair, kind, quote
            ))
        }
        OrderKind::MarketSell => {
            let amount = order.amount.ok_or_else(|| {
                AgencyError::InvalidParameters("market_sell requires an amount".to_string())
            })?;
            Ok(format!(
                "pair={}&order_type={}&amount={}",
                order.pair, kind, amount
            ))
        }
    }
}

fn as_refs(params: &[(String, String)]) -> Vec<(&str, &str)> {
    params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

/// Thin typed wrapper over [`RestClient`] for the Coincheck API. Each
/// method fixes the endpoint path, the credential tier, and the parameter
/// encoding; the exchange's `success` flag is verified before anything is
/// returned.
pub struct CoincheckRestClient<R: RestClient> {
    client: R,
}

impl<R: RestClient> CoincheckRestClient<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &R {
        &self.client
    }

    // -- public --

    pub async fn get_ticker(&self) -> Result<Value, AgencyError> {
        self.client
            .get(endpoints::TICKER, &[], None)
            .await
            .and_then(check_success)
    }

    pub async fn get_trades(
        &self,
        pair: &str,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        let mut params = vec![("pair".to_string(), pair.to_string())];
        if let Some(p) = pagination {
            params.extend(p.to_query_params());
        }
        self.client
            .get(endpoints::TRADES, &as_refs(&params), None)
            .await
            .and_then(check_success)
    }

    pub async fn get_order_book(&self) -> Result<Value, AgencyError> {
        self.client
            .get(endpoints::ORDER_BOOKS, &[], None)
            .await
            .and_then(check_success)
    }

    /// Calculate the rate for a hypothetical order. Either `price` or
    /// `amount` must be given, per the exchange's documentation.
    pub async fn calc_rate(
        &self,
        pair: &str,
        order_type: &str,
        price: Option<&str>,
        amount: Option<&str>,
    ) -> Result<Value, AgencyError> {
        if price.is_none() && amount.is_none() {
            return Err(AgencyError::InvalidParameters(
                "calc_rate requires price or amount".to_string(),
            ));
        }
        let mut params = vec![
            ("pair".to_string(), pair.to_string()),
            ("order_type".to_string(), order_type.to_string()),
        ];
        if let Some(price) = price {
            params.push(("price".to_string(), price.to_string()));
        }
        if let Some(amount) = amount {
            params.push(("amount".to_string(), amount.to_string()));
        }
        self.client
            .get(endpoints::ORDERS_RATE, &as_refs(&params), None)
            .await
            .and_then(check_success)
    }

    pub async fn get_buy_rate(&self, pair: &str) -> Result<Value, AgencyError> {
        let path = format!("{}/{}", endpoints::RATE, pair);
        self.client
            .get(&path, &[], None)
            .await
            .and_then(check_success)
    }

    // -- orders (trade tier for writes, query tier for reads) --

    pub async fn new_order(&self, order: &OrderRequest) -> Result<Value, AgencyError> {
        let body = encode_order_body(order)?;
        self.client
            .post(
                endpoints::ORDERS,
                body.as_bytes(),
                Some(CredentialTier::Trade),
            )
            .await
            .and_then(check_success)
    }

    pub async fn get_open_orders(&self) -> Result<Value, AgencyError> {
        self.client
            .get(endpoints::ORDERS_OPENS, &[], Some(CredentialTier::Query))
            .await
            .and_then(check_success)
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, AgencyError> {
        let path = format!("{}/{}", endpoints::ORDERS, order_id);
        self.client
            .delete(&path, Some(CredentialTier::Trade))
            .await
            .and_then(check_success)
    }

    pub async fn get_cancellation_status(&self, order_id: &str) -> Result<Value, AgencyError> {
        self.client
            .get(
                endpoints::ORDERS_CANCEL_STATUS,
                &[("id", order_id)],
                Some(CredentialTier::Query),
            )
            .await
            .and_then(check_success)
    }

    pub async fn get_order_history(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        let params = pagination.map(PaginationParams::to_query_params).unwrap_or_default();
        self.client
            .get(
                endpoints::ORDERS_TRANSACTIONS,
                &as_refs(&params),
                Some(CredentialTier::Query),
            )
            .await
            .and_then(check_success)
    }

    // -- account (query tier) --

    pub async fn get_balance(&self) -> Result<Value, AgencyError> {
        self.client
            .get(endpoints::ACCOUNTS_BALANCE, &[], Some(CredentialTier::Query))
            .await
            .and_then(check_success)
    }

    pub async fn get_account_info(&self) -> Result<Value, AgencyError> {
        self.client
            .get(endpoints::ACCOUNTS, &[], Some(CredentialTier::Query))
            .await
            .and_then(check_success)
    }

    // -- bank accounts and withdrawals (withdraw tier) --

    pub async fn get_bank_accounts(&self) -> Result<Value, AgencyError> {
        self.client
            .get(endpoints::BANK_ACCOUNTS, &[], Some(CredentialTier::Withdraw))
            .await
            .and_then(check_success)
    }

    pub async fn add_bank_account(
        &self,
        bank_name: &str,
        branch_name: &str,
        bank_account_type: &str,
        number: &str,
        name: &str,
    ) -> Result<Value, AgencyError> {
        let body = format!(
            "bank_name={bank_name}&branch_name={branch_name}&bank_account_type={bank_account_type}&number={number}&name={name}"
        );
        self.client
            .post(
                endpoints::BANK_ACCOUNTS,
                body.as_bytes(),
                Some(CredentialTier::Withdraw),
            )
            .await
            .and_then(check_success)
    }

    pub async fn remove_bank_account(&self, bank_account_id: i64) -> Result<Value, AgencyError> {
        let path = format!("{}/{}", endpoints::BANK_ACCOUNTS, bank_account_id);
        self.client
            .delete(&path, Some(CredentialTier::Withdraw))
            .await
            .and_then(check_success)
    }

    pub async fn get_withdraws_history(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        let params = pagination.map(PaginationParams::to_query_params).unwrap_or_default();
        self.client
            .get(
                endpoints::WITHDRAWS,
                &as_refs(&params),
                Some(CredentialTier::Withdraw),
            )
            .await
            .and_then(check_success)
    }

    pub async fn withdraw_request(
        &self,
        bank_account_id: i64,
        amount: &str,
        currency: &str,
    ) -> Result<Value, AgencyError> {
        let body =
            format!("bank_account_id={bank_account_id}&amount={amount}&currency={currency}");
        self.client
            .post(
                endpoints::WITHDRAWS,
                body.as_bytes(),
                Some(CredentialTier::Withdraw),
            )
            .await
            .and_then(check_success)
    }

    pub async fn withdraw_cancel(&self, withdraw_id: i64) -> Result<Value, AgencyError> {
        let path = format!("{}/{}", endpoints::WITHDRAWS, withdraw_id);
        self.client
            .delete(&path, Some(CredentialTier::Withdraw))
            .await
            .and_then(check_success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::OrderSide;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn success_false_becomes_exchange_logic_error() {
        let result = check_success(json!({"success": false, "error": "invalid amount"}));
        match result {
            Err(AgencyError::ExchangeLogic { message }) => assert_eq!(message, "invalid amount"),
            other => panic!("expected exchange logic error, got {other:?}"),
        }
    }

    #[test]
    fn success_true_and_absent_flag_pass_through() {
        assert!(check_success(json!({"success": true, "id": 1})).is_ok());
        assert!(check_success(json!({"last": 4_000_000})).is_ok());
    }

    #[test]
    fn limit_order_body_encoding() {
        let order = OrderRequest::limit(
            "btc_jpy",
            OrderSide::Buy,
            Decimal::new(4_000_000, 0),
            Decimal::new(5, 3),
        );
        assert_eq!(
            encode_order_body(&order).unwrap(),
            "pair=btc_jpy&order_type=buy&rate=4000000&amount=0.005"
        );
    }

    #[test]
    fn market_buy_uses_quote_amount_field() {
        let order = OrderRequest::market_buy("btc_jpy", Decimal::new(10_000, 0));
        assert_eq!(
            encode_order_body(&order).unwrap(),
            "pair=btc_jpy&order_type=market_buy&market_buy_amount=10000"
        );
    }

    #[test]
    fn market_sell_carries_amount_only() {
        let order = OrderRequest::market_sell("btc_jpy", Decimal::new(1, 2));
        assert_eq!(
            encode_order_body(&order).unwrap(),
            "pair=btc_jpy&order_type=market_sell&amount=0.01"
        );
    }

    #[test]
    fn limit_order_without_rate_is_rejected() {
        let order = OrderRequest {
            pair: "btc_jpy".to_string(),
            kind: OrderKind::Limit(OrderSide::Sell),
            rate: None,
            amount: Some(Decimal::ONE),
        };
        assert!(matches!(
            encode_order_body(&order),
            Err(AgencyError::InvalidParameters(_))
        ));
    }
}
