use std::sync::Arc;

use arbscan::{CompareRequest, Timeframe};
use arbscan_mock::MockExchange;

use crate::helpers::{DAY, DAY_MS, ETH, builder_with, candle};

#[tokio::test]
async fn three_exchanges_with_gaps_align_on_the_intersection() {
    let arbscan = builder_with(vec![
        Arc::new(MockExchange::new("binance").gap_every(2)),
        Arc::new(MockExchange::new("kucoin").gap_every(3)),
        Arc::new(MockExchange::new("okx").gap_every(5)),
    ])
    .build()
    .unwrap();
    let req = CompareRequest::new(&["binance", "kucoin", "okx"], ETH, "1m", DAY).unwrap();
    let report = arbscan.compare_closes(&req).await.unwrap();

    // minutes of the day coprime to 30: 8 per half hour
    assert_eq!(report.table.len(), 48 * 8);
    assert_eq!(report.since, DAY_MS);
    assert_eq!(report.timeframe, Timeframe::M1);
    let records: Vec<usize> = report.coverage.iter().map(|c| c.records).collect();
    assert_eq!(records, vec![720, 960, 1_152]);

    assert_eq!(
        report.header(),
        vec!["unix", "timestamp", "binance", "kucoin", "okx", "max", "min", "mean", "median"]
    );
    let rows = report.rows();
    assert_eq!(rows[0].unix, DAY_MS + 60_000);
    assert_eq!(rows[0].timestamp, "2022-09-14 00:01:00");
    for row in &rows {
        let (ex, stats) = row.values.split_at(3);
        let max = ex.iter().copied().fold(f64::MIN, f64::max);
        let min = ex.iter().copied().fold(f64::MAX, f64::min);
        assert_eq!(stats[0], max);
        assert_eq!(stats[1], min);
        assert!(min <= stats[2] && stats[2] <= max);
        assert!(min <= stats[3] && stats[3] <= max);
    }
}

#[tokio::test]
async fn exchanges_are_processed_in_request_order() {
    let fixed = |v: f64| (0..3).map(|i| candle(DAY_MS + i * 3_600_000, v)).collect::<Vec<_>>();
    let arbscan = builder_with(vec![
        Arc::new(MockExchange::new("a").with_series(ETH, fixed(10.0))),
        Arc::new(MockExchange::new("b").with_series(ETH, fixed(20.0))),
        Arc::new(MockExchange::new("c").with_series(ETH, fixed(15.0))),
    ])
    .build()
    .unwrap();
    let req = CompareRequest::new(&["c", "a", "b"], ETH, "1h", DAY).unwrap();
    let report = arbscan.compare_closes(&req).await.unwrap();

    assert_eq!(report.table.exchanges().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    assert_eq!(report.table.len(), 3);
    assert_eq!(report.table.column("max").unwrap().values(), &[20.0, 20.0, 20.0]);
    assert_eq!(report.table.column("min").unwrap().values(), &[10.0, 10.0, 10.0]);
    assert_eq!(report.table.column("mean").unwrap().values(), &[15.0, 15.0, 15.0]);
    assert_eq!(report.table.column("median").unwrap().values(), &[15.0, 15.0, 15.0]);
}

#[tokio::test]
async fn unregistered_connectors_are_ignored_unless_requested() {
    let arbscan = builder_with(vec![
        Arc::new(MockExchange::new("binance")),
        Arc::new(MockExchange::new("kraken")),
        Arc::new(MockExchange::new("dead").without_candles()),
    ])
    .build()
    .unwrap();
    let req = CompareRequest::new(&["kraken"], ETH, "1h", DAY).unwrap();
    let report = arbscan.compare_closes(&req).await.unwrap();
    assert_eq!(report.table.len(), 24);
    assert_eq!(report.coverage.len(), 1);
}
