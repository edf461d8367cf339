use std::sync::Arc;

use arbscan::{ArbscanError, CompareRequest};
use arbscan_mock::MockExchange;

use crate::helpers::{DAY, ETH, builder_with};

#[test]
fn request_validation() {
    for bad in ["2022-9-14", "2022/09/14", "abcd-09-14"] {
        let err = CompareRequest::new(&["binance"], ETH, "1m", bad).unwrap_err();
        assert!(matches!(err, ArbscanError::InvalidDateFormat { .. }), "{bad}");
    }
    let err = CompareRequest::new(&["binance"], ETH, "15m", DAY).unwrap_err();
    assert!(matches!(err, ArbscanError::InvalidTimeframe(_)));

    let none: [&str; 0] = [];
    assert!(matches!(
        CompareRequest::new(&none, ETH, "1m", DAY),
        Err(ArbscanError::InvalidArg(_))
    ));
}

#[tokio::test]
async fn unknown_exchange_aborts_the_run() {
    let arbscan = builder_with(vec![Arc::new(MockExchange::new("binance"))])
        .build()
        .unwrap();
    let req = CompareRequest::new(&["binance", "ftx"], ETH, "1h", DAY).unwrap();
    let err = arbscan.compare_closes(&req).await.unwrap_err();
    assert!(matches!(err, ArbscanError::UnsupportedExchange { exchange, .. } if exchange == "ftx"));
}

#[tokio::test]
async fn exchange_without_candles_aborts_the_run() {
    let arbscan = builder_with(vec![
        Arc::new(MockExchange::new("binance")),
        Arc::new(MockExchange::new("dead").without_candles()),
    ])
    .build()
    .unwrap();
    let req = CompareRequest::new(&["binance", "dead"], ETH, "1h", DAY).unwrap();
    assert!(matches!(
        arbscan.compare_closes(&req).await,
        Err(ArbscanError::UnsupportedExchange { .. })
    ));
}

#[tokio::test]
async fn connector_failure_aborts_the_run() {
    let arbscan = builder_with(vec![Arc::new(MockExchange::new("binance"))])
        .build()
        .unwrap();
    let req = CompareRequest::new(&["binance"], "FAIL", "1m", DAY).unwrap();
    assert!(matches!(
        arbscan.compare_closes(&req).await,
        Err(ArbscanError::Connector { .. })
    ));
}
