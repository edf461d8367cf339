use std::sync::Arc;
use std::time::Duration;

use arbscan::{Arbscan, ArbscanConfig, ArbscanError};
use arbscan_mock::MockExchange;

#[test]
fn build_requires_a_connector() {
    let err = Arbscan::builder().build().err().expect("error");
    assert!(matches!(err, ArbscanError::InvalidArg(_)));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = Arbscan::builder()
        .with_connector(Arc::new(MockExchange::new("binance")))
        .with_connector(Arc::new(MockExchange::new("binance")))
        .build()
        .err()
        .expect("error");
    assert!(matches!(err, ArbscanError::InvalidArg(msg) if msg.contains("binance")));
}

#[test]
fn zero_page_limit_and_empty_window_are_rejected() {
    let c = || Arc::new(MockExchange::new("binance"));
    assert!(Arbscan::builder().with_connector(c()).page_limit(0).build().is_err());
    assert!(
        Arbscan::builder()
            .with_connector(c())
            .fetch_window(Duration::ZERO)
            .build()
            .is_err()
    );
}

#[test]
fn lookup_by_identifier() {
    let arbscan = Arbscan::builder()
        .with_connector(Arc::new(MockExchange::new("binance")))
        .with_connector(Arc::new(MockExchange::new("kraken")))
        .build()
        .unwrap();
    assert_eq!(arbscan.exchanges().collect::<Vec<_>>(), vec!["binance", "kraken"]);
    assert_eq!(arbscan.connector("kraken").unwrap().name(), "kraken");

    let err = arbscan.connector("ftx").err().expect("error");
    assert!(matches!(err, ArbscanError::UnsupportedExchange { exchange, .. } if exchange == "ftx"));
}

#[test]
fn builder_setters_reach_the_config() {
    let arbscan = Arbscan::builder()
        .with_connector(Arc::new(MockExchange::new("binance")))
        .fetch_window(Duration::from_secs(3_600))
        .page_limit(100)
        .min_request_delay(Duration::from_millis(20))
        .build()
        .unwrap();
    let cfg = arbscan.config();
    assert_eq!(cfg.fetch_window, Duration::from_secs(3_600));
    assert_eq!(cfg.page_limit, Some(100));
    assert_eq!(cfg.min_request_delay, Duration::from_millis(20));

    let replaced = Arbscan::builder()
        .with_connector(Arc::new(MockExchange::new("binance")))
        .config(ArbscanConfig::default())
        .build()
        .unwrap();
    assert_eq!(replaced.config(), &ArbscanConfig::default());
}
