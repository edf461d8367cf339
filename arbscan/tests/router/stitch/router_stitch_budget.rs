use std::time::Duration;

use arbscan::{Span, Timeframe};
use arbscan_mock::{DynamicMockExchange, MockBehavior};

use crate::helpers::{DAY_MS, ETH, builder_with, minutes};

#[tokio::test]
async fn one_day_of_minutes_in_capped_pages() {
    let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
    ctl.set_behavior(ETH, MockBehavior::Series(minutes(DAY_MS, 3_000))).await;
    let arbscan = builder_with(vec![c.clone()]).page_limit(500).build().unwrap();

    let stitched = arbscan
        .fetch_series(&c, ETH, Timeframe::M1, DAY_MS)
        .await
        .unwrap();
    assert_eq!(stitched.candles.len(), 1_440);
    assert_eq!(stitched.coverage.records, 1_440);
    assert_eq!(stitched.coverage.pages, 3);
    assert_eq!(
        stitched.coverage.span,
        Some(Span {
            start: DAY_MS,
            end: DAY_MS + 1_439 * 60_000
        })
    );

    let calls = ctl.calls().await;
    let plan: Vec<(i64, usize)> = calls.iter().map(|c| ((c.since - DAY_MS) / 60_000, c.limit)).collect();
    assert_eq!(plan, vec![(0, 500), (500, 500), (1_000, 440)]);
}

#[tokio::test]
async fn budget_follows_timeframe_and_window() {
    for (tf, expected) in [(Timeframe::M5, 288), (Timeframe::H1, 24)] {
        let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
        let series = arbscan_mock::ramp(DAY_MS, tf, 1_000, 1.0, 1.0);
        ctl.set_behavior(ETH, MockBehavior::Series(series)).await;
        let arbscan = builder_with(vec![c.clone()]).build().unwrap();
        let stitched = arbscan.fetch_series(&c, ETH, tf, DAY_MS).await.unwrap();
        assert_eq!(stitched.candles.len(), expected, "{tf}");
    }

    let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
    ctl.set_behavior(ETH, MockBehavior::Series(minutes(DAY_MS, 3_000))).await;
    let arbscan = builder_with(vec![c.clone()])
        .fetch_window(Duration::from_secs(2 * 3_600))
        .build()
        .unwrap();
    let stitched = arbscan.fetch_series(&c, ETH, Timeframe::M1, DAY_MS).await.unwrap();
    assert_eq!(stitched.candles.len(), 120);
}

#[tokio::test]
async fn sparse_history_yields_a_short_series() {
    let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
    ctl.set_behavior(ETH, MockBehavior::Series(minutes(DAY_MS, 90))).await;
    let arbscan = builder_with(vec![c.clone()]).page_limit(50).build().unwrap();
    let stitched = arbscan.fetch_series(&c, ETH, Timeframe::M1, DAY_MS).await.unwrap();
    assert_eq!(stitched.candles.len(), 90);
    // 50 + 40, then one empty page ends the loop
    assert_eq!(ctl.calls().await.len(), 3);
    assert_eq!(stitched.coverage.pages, 3);
}

#[tokio::test]
async fn empty_history_is_not_an_error() {
    let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
    ctl.set_behavior(ETH, MockBehavior::Series(vec![])).await;
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();
    let stitched = arbscan.fetch_series(&c, ETH, Timeframe::M1, DAY_MS).await.unwrap();
    assert!(stitched.candles.is_empty());
    assert_eq!(stitched.coverage.span, None);
}
