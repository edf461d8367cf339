use std::sync::Arc;
use std::time::Duration;

use arbscan::{ExchangeConnector, Timeframe};
use arbscan_mock::{DynamicMockExchange, MockBehavior, MockExchange};
use tokio::time::Instant;

use crate::helpers::{DAY_MS, ETH, builder_with, minutes};

#[tokio::test(start_paused = true)]
async fn sleeps_for_the_exchange_delay_before_each_request() {
    let (c, ctl) = DynamicMockExchange::with_rate_limit("slow", Duration::from_millis(500));
    ctl.set_behavior(ETH, MockBehavior::Series(minutes(DAY_MS, 10))).await;
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();

    let start = Instant::now();
    arbscan.fetch_page(&c, ETH, Timeframe::M1, DAY_MS, 5).await.unwrap();
    arbscan.fetch_page(&c, ETH, Timeframe::M1, DAY_MS + 300_000, 5).await.unwrap();

    let calls = ctl.calls().await;
    assert!(calls[0].at - start >= Duration::from_millis(500));
    assert!(calls[1].at - calls[0].at >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn configured_floor_wins_when_larger() {
    let (c, ctl) = DynamicMockExchange::with_rate_limit("fast", Duration::from_millis(50));
    ctl.set_behavior(ETH, MockBehavior::Series(minutes(DAY_MS, 10))).await;
    let arbscan = builder_with(vec![c.clone()])
        .min_request_delay(Duration::from_secs(2))
        .build()
        .unwrap();

    let start = Instant::now();
    arbscan.fetch_page(&c, ETH, Timeframe::M1, DAY_MS, 5).await.unwrap();
    assert!(ctl.calls().await[0].at - start >= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn no_delay_when_nothing_is_advertised() {
    let c: Arc<dyn ExchangeConnector> = Arc::new(MockExchange::new("binance"));
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();
    let start = Instant::now();
    arbscan.fetch_page(&c, ETH, Timeframe::M1, DAY_MS, 5).await.unwrap();
    assert_eq!(Instant::now() - start, Duration::ZERO);
}
