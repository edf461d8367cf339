use std::sync::Arc;

use arbscan::{ArbscanError, ExchangeConnector, Timeframe, tag_err};
use arbscan_mock::{DynamicMockExchange, MockBehavior, MockExchange};

use crate::helpers::{DAY_MS, ETH, builder_with, candle, minutes};

#[tokio::test]
async fn missing_candle_capability_is_unsupported() {
    let c: Arc<dyn ExchangeConnector> = Arc::new(MockExchange::new("dead").without_candles());
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();
    let err = arbscan
        .fetch_page(&c, ETH, Timeframe::M1, DAY_MS, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, ArbscanError::UnsupportedExchange { exchange, .. } if exchange == "dead"));
}

#[tokio::test]
async fn timeframe_not_served_is_invalid() {
    let c: Arc<dyn ExchangeConnector> =
        Arc::new(MockExchange::new("hourly").timeframes(&[Timeframe::H1]));
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();
    let err = arbscan
        .fetch_page(&c, ETH, Timeframe::M5, DAY_MS, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, ArbscanError::InvalidTimeframe(_)));
}

#[tokio::test]
async fn page_is_normalized() {
    let (c, ctl) = DynamicMockExchange::new_with_controller("messy");
    // out of order, one record before `since`, more than requested
    let page = vec![
        candle(DAY_MS + 120_000, 3.0),
        candle(DAY_MS - 60_000, 0.0),
        candle(DAY_MS, 1.0),
        candle(DAY_MS + 180_000, 4.0),
        candle(DAY_MS + 60_000, 2.0),
    ];
    ctl.set_behavior(ETH, MockBehavior::Pages(vec![page])).await;
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();

    let got = arbscan
        .fetch_page(&c, ETH, Timeframe::M1, DAY_MS, 3)
        .await
        .unwrap();
    let times: Vec<i64> = got.iter().map(|c| c.open_time - DAY_MS).collect();
    assert_eq!(times, vec![0, 60_000, 120_000]);
}

#[tokio::test]
async fn request_arguments_are_forwarded() {
    let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
    ctl.set_behavior(ETH, MockBehavior::Series(minutes(DAY_MS, 10))).await;
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();
    let got = arbscan
        .fetch_page(&c, ETH, Timeframe::M1, DAY_MS + 120_000, 4)
        .await
        .unwrap();
    assert_eq!(got.len(), 4);
    assert_eq!(got[0].close, 3.0);

    let calls = ctl.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].symbol, ETH);
    assert_eq!(calls[0].timeframe, Timeframe::M1);
    assert_eq!(calls[0].since, DAY_MS + 120_000);
    assert_eq!(calls[0].limit, 4);
}

#[tokio::test]
async fn connector_failures_propagate() {
    let c: Arc<dyn ExchangeConnector> = Arc::new(MockExchange::new("binance"));
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();
    let err = arbscan
        .fetch_page(&c, "FAIL", Timeframe::M1, DAY_MS, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ArbscanError::Connector { connector, .. } if connector == "binance"));
}

#[test]
fn tag_err_attributes_untagged_failures() {
    let tagged = tag_err("kraken", ArbscanError::Data("socket closed".into()));
    assert_eq!(tagged, ArbscanError::connector("kraken", "socket closed"));

    let malformed = ArbscanError::MalformedRecord("short row".into());
    assert_eq!(tag_err("kraken", malformed.clone()), malformed);
}
