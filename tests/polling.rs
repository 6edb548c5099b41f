mod common;

use common::MockRest;
use koinx::core::polling::spawn_ticker_poll;
use koinx::exchanges::coincheck::CoincheckAgency;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn poll_delivers_tickers_and_stops_cleanly() {
    let mock = MockRest::new(json!({"last": 4_000_000, "bid": 3_999_000, "ask": 4_001_000}));
    let agency = Arc::new(CoincheckAgency::new(
        mock,
        "https://coincheck.com".to_string(),
    ));

    let mut poll = spawn_ticker_poll(agency, "btc_jpy".to_string(), Duration::from_millis(10));

    let first = poll.recv().await.expect("first tick");
    assert_eq!(first["last"], 4_000_000);
    let second = poll.recv().await.expect("second tick");
    assert_eq!(second["last"], 4_000_000);

    poll.stop().await;
}

#[tokio::test]
async fn dropping_the_handle_ends_the_task() {
    let mock = MockRest::new(json!({"last": 1}));
    let agency = Arc::new(CoincheckAgency::new(
        mock,
        "https://coincheck.com".to_string(),
    ));

    let mut poll = spawn_ticker_poll(agency, "btc_jpy".to_string(), Duration::from_millis(5));
    poll.recv().await.expect("one tick");
    drop(poll);
    // Nothing to assert beyond not hanging; the task exits once the
    // channel and shutdown handles are gone.
}
