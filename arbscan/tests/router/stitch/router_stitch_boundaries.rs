use std::collections::HashSet;

use arbscan::{ArbscanError, Timeframe};
use arbscan_mock::{DynamicMockExchange, MockBehavior};
use proptest::prelude::*;

use crate::helpers::{DAY_MS, ETH, builder_with, candle, minutes};

#[tokio::test]
async fn records_at_or_past_the_window_end_are_dropped() {
    // one candle every two minutes for two days: only 720 fall inside the window
    let series: Vec<_> = (0..1_440)
        .map(|i| candle(DAY_MS + i * 120_000, 1.0))
        .collect();
    let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
    ctl.set_behavior(ETH, MockBehavior::Series(series)).await;
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();

    let stitched = arbscan.fetch_series(&c, ETH, Timeframe::M1, DAY_MS).await.unwrap();
    assert_eq!(stitched.candles.len(), 720);
    assert!(stitched.candles.iter().all(|c| c.open_time < DAY_MS + 86_400_000));
}

#[tokio::test]
async fn cursor_moves_one_step_past_the_last_record() {
    let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
    ctl.set_behavior(
        ETH,
        MockBehavior::Pages(vec![minutes(DAY_MS, 3), minutes(DAY_MS + 600_000, 2)]),
    )
    .await;
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();
    let stitched = arbscan.fetch_series(&c, ETH, Timeframe::M1, DAY_MS).await.unwrap();
    assert_eq!(stitched.candles.len(), 5);

    let sinces: Vec<i64> = ctl.calls().await.iter().map(|c| c.since - DAY_MS).collect();
    assert_eq!(sinces, vec![0, 180_000, 720_000]);
}

#[tokio::test]
async fn overlapping_pages_do_not_duplicate() {
    let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
    // the second page repeats the tail of the first one
    ctl.set_behavior(
        ETH,
        MockBehavior::Pages(vec![minutes(DAY_MS, 5), minutes(DAY_MS + 180_000, 5)]),
    )
    .await;
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();
    let stitched = arbscan.fetch_series(&c, ETH, Timeframe::M1, DAY_MS).await.unwrap();
    let times: Vec<i64> = stitched.candles.iter().map(|c| (c.open_time - DAY_MS) / 60_000).collect();
    assert_eq!(times, vec![0, 1, 2, 3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn failure_mid_run_aborts() {
    let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
    ctl.set_behavior(ETH, MockBehavior::Fail(ArbscanError::connector("P0", "503")))
        .await;
    let arbscan = builder_with(vec![c.clone()]).build().unwrap();
    let err = arbscan.fetch_series(&c, ETH, Timeframe::M1, DAY_MS).await.unwrap_err();
    assert!(matches!(err, ArbscanError::Connector { .. }));
}

fn arb_pages() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(0i64..200, 0..40), 1..6)
}

proptest! {
    #[test]
    fn stitched_series_is_strictly_ascending(pages in arb_pages()) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let candles = rt.block_on(async {
            let (c, ctl) = DynamicMockExchange::new_with_controller("P0");
            let pages: Vec<Vec<arbscan::Candle>> = pages
                .iter()
                .map(|p| p.iter().map(|m| candle(DAY_MS + m * 60_000, 1.0)).collect())
                .collect();
            ctl.set_behavior(ETH, MockBehavior::Pages(pages)).await;
            let arbscan = builder_with(vec![c.clone()]).build().unwrap();
            arbscan.fetch_series(&c, ETH, Timeframe::M1, DAY_MS).await.unwrap().candles
        });
        prop_assert!(candles.windows(2).all(|w| w[0].open_time < w[1].open_time));
        let unique: HashSet<i64> = candles.iter().map(|c| c.open_time).collect();
        prop_assert_eq!(unique.len(), candles.len());
    }
}
