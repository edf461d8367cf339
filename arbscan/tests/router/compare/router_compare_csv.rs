use std::sync::Arc;

use arbscan::CompareRequest;
use arbscan::output::write_comparison;
use arbscan_mock::MockExchange;

use crate::helpers::{DAY, DAY_MS, ETH, builder_with, candle};

#[tokio::test]
async fn comparison_is_written_as_one_combined_csv() {
    let fixed = |v: f64| (0..3).map(|i| candle(DAY_MS + i * 3_600_000, v)).collect::<Vec<_>>();
    let arbscan = builder_with(vec![
        Arc::new(MockExchange::new("a").with_series(ETH, fixed(10.0))),
        Arc::new(MockExchange::new("b").with_series(ETH, fixed(20.0))),
        Arc::new(MockExchange::new("c").with_series(ETH, fixed(15.0))),
    ])
    .build()
    .unwrap();
    let req = CompareRequest::new(&["a", "b", "c"], ETH, "1h", DAY).unwrap();
    let report = arbscan.compare_closes(&req).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("closes_ETHUSDT_1h.csv");
    write_comparison(&report, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("unix,timestamp,a,b,c,max,min,mean,median"));
    assert_eq!(
        lines.next(),
        Some("1663113600000,2022-09-14 00:00:00,10.0,20.0,15.0,20.0,10.0,15.0,15.0")
    );
    assert_eq!(lines.count(), 2);
}
