mod common;

use common::MockRest;
use koinx::core::errors::AgencyError;
use koinx::core::traits::TradingAgency;
use koinx::core::types::{CredentialTier, OrderRequest, OrderSide, PaginationParams, SortOrder};
use koinx::exchanges::coincheck::CoincheckAgency;
use rust_decimal::Decimal;
use serde_json::json;

fn agency(mock: MockRest) -> CoincheckAgency<MockRest> {
    CoincheckAgency::new(mock, "https://coincheck.com".to_string())
}

#[tokio::test]
async fn operations_request_their_least_privileged_tier() {
    let mock = MockRest::ok();
    let log = mock.call_log();
    let agency = agency(mock);

    agency.get_ticker("btc_jpy").await.unwrap();
    agency.get_trades("btc_jpy", None).await.unwrap();
    agency.get_order_book("btc_jpy").await.unwrap();
    agency.get_balance().await.unwrap();
    agency.get_open_orders(None).await.unwrap();
    agency.get_order_history(None).await.unwrap();
    let order = OrderRequest::limit(
        "btc_jpy",
        OrderSide::Buy,
        Decimal::new(4_000_000, 0),
        Decimal::new(5, 3),
    );
    agency.new_order(&order).await.unwrap();
    agency.cancel_order("12345").await.unwrap();
    agency.get_bank_accounts().await.unwrap();

    let calls = log.lock().unwrap();
    let tiers: Vec<Option<CredentialTier>> = calls.iter().map(|c| c.auth).collect();
    assert_eq!(
        tiers,
        vec![
            None,                            // ticker
            None,                            // trades
            None,                            // order book
            Some(CredentialTier::Query),     // balance
            Some(CredentialTier::Query),     // open orders
            Some(CredentialTier::Query),     // history
            Some(CredentialTier::Trade),     // new order
            Some(CredentialTier::Trade),     // cancel
            Some(CredentialTier::Withdraw),  // bank accounts
        ]
    );
}

#[tokio::test]
async fn below_minimum_order_never_reaches_the_transport() {
    let mock = MockRest::ok();
    let log = mock.call_log();
    let agency = agency(mock);

    let order = OrderRequest::limit(
        "btc_jpy",
        OrderSide::Buy,
        Decimal::new(4_000_000, 0),
        Decimal::new(4, 3), // 0.004, below the 0.005 floor
    );
    let result = agency.new_order(&order).await;

    assert!(matches!(result, Err(AgencyError::InvalidParameters(_))));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn market_buy_skips_the_base_amount_floor() {
    let mock = MockRest::ok();
    let log = mock.call_log();
    let agency = agency(mock);

    let order = OrderRequest::market_buy("btc_jpy", Decimal::new(10_000, 0));
    agency.new_order(&order).await.unwrap();

    let calls = log.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body.as_deref(),
        Some("pair=btc_jpy&order_type=market_buy&market_buy_amount=10000")
    );
}

#[tokio::test]
async fn http_200_with_success_false_is_not_a_placed_order() {
    let mock = MockRest::new(json!({
        "success": false,
        "error": "invalid amount"
    }));
    let agency = agency(mock);

    let order = OrderRequest::limit(
        "btc_jpy",
        OrderSide::Buy,
        Decimal::new(4_000_000, 0),
        Decimal::new(5, 3),
    );
    let result = agency.new_order(&order).await;
    match result {
        Err(AgencyError::ExchangeLogic { message }) => {
            assert_eq!(message, "invalid amount");
        }
        other => panic!("expected exchange logic error, got {other:?}"),
    }

    // Same classification on a read path.
    let result = agency.get_balance().await;
    assert!(matches!(result, Err(AgencyError::ExchangeLogic { .. })));
}

#[tokio::test]
async fn cancel_hits_the_order_id_path_with_delete() {
    let mock = MockRest::ok();
    let log = mock.call_log();
    let agency = agency(mock);

    agency.cancel_order("987654").await.unwrap();

    let calls = log.lock().unwrap();
    assert_eq!(calls[0].method, "DELETE");
    assert_eq!(calls[0].endpoint, "/api/exchange/orders/987654");
}

#[tokio::test]
async fn pagination_rides_in_the_query_string() {
    let mock = MockRest::ok();
    let log = mock.call_log();
    let agency = agency(mock);

    let pagination = PaginationParams::new(25, SortOrder::Asc).starting_after("1000");
    agency
        .get_trades("btc_jpy", Some(&pagination))
        .await
        .unwrap();

    let calls = log.lock().unwrap();
    assert_eq!(calls[0].endpoint, "/api/trades");
    assert_eq!(
        calls[0].query,
        vec![
            ("pair".to_string(), "btc_jpy".to_string()),
            ("limit".to_string(), "25".to_string()),
            ("order".to_string(), "asc".to_string()),
            ("starting_after".to_string(), "1000".to_string()),
        ]
    );
}

#[tokio::test]
async fn generic_query_resolves_through_the_catalog() {
    let mock = MockRest::new(json!({"last": 4_000_000}));
    let log = mock.call_log();
    let agency = agency(mock);

    agency
        .query("GET", "ticker", &serde_json::Value::Null)
        .await
        .unwrap();
    agency
        .query("GET", "rate", &json!({"pair": "etc_jpy"}))
        .await
        .unwrap();

    let calls = log.lock().unwrap();
    assert_eq!(calls[0].endpoint, "/api/ticker");
    assert_eq!(calls[1].endpoint, "/api/rate/etc_jpy");
    assert!(calls[1].query.is_empty());
}

#[tokio::test]
async fn rate_without_a_pair_never_reaches_the_transport() {
    let mock = MockRest::ok();
    let log = mock.call_log();
    let agency = agency(mock);

    let result = agency.query("GET", "rate", &serde_json::Value::Null).await;

    assert!(matches!(result, Err(AgencyError::InvalidParameters(_))));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn query_refuses_signed_commands() {
    let agency = agency(MockRest::ok());
    let result = agency
        .query("GET", "accounts/balance", &serde_json::Value::Null)
        .await;
    assert!(matches!(result, Err(AgencyError::InvalidParameters(_))));

    let result = agency
        .query("GET", "no_such_command", &serde_json::Value::Null)
        .await;
    assert!(matches!(result, Err(AgencyError::InvalidParameters(_))));
}

#[tokio::test]
async fn execute_dispatches_signed_reads_and_writes() {
    let mock = MockRest::ok();
    let log = mock.call_log();
    let agency = agency(mock);

    agency
        .execute("GET", "orders/cancel_status", &json!({"id": "42"}))
        .await
        .unwrap();
    agency
        .execute(
            "POST",
            "withdraws/request",
            &json!({"bank_account_id": 7, "amount": "10000", "currency": "JPY"}),
        )
        .await
        .unwrap();

    let calls = log.lock().unwrap();
    assert_eq!(calls[0].endpoint, "/api/exchange/orders/cancel_status");
    assert_eq!(calls[0].auth, Some(CredentialTier::Query));
    assert_eq!(calls[1].endpoint, "/api/withdraws");
    assert_eq!(calls[1].auth, Some(CredentialTier::Withdraw));
    let body = calls[1].body.as_deref().unwrap();
    assert!(body.contains("bank_account_id=7"));
    assert!(body.contains("currency=JPY"));
}
