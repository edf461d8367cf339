#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use arbscan::ExchangeConnector;
use arbscan_mock::MockExchange;

/// Exchanges the demos compare.
pub const EXCHANGES: &[&str] = &["binance", "kucoin", "kraken"];

/// Connectors for [`EXCHANGES`].
///
/// With `ARBSCAN_EXAMPLES_USE_MOCK` set every exchange is mocked; otherwise
/// binance goes to the live API and the rest stay mocked.
pub fn get_connectors() -> Result<Vec<Arc<dyn ExchangeConnector>>, arbscan::ArbscanError> {
    let use_mock = std::env::var("ARBSCAN_EXAMPLES_USE_MOCK").is_ok();
    if use_mock {
        println!("--- (Using mock exchanges) ---");
    }
    EXCHANGES
        .iter()
        .map(|&name| -> Result<Arc<dyn ExchangeConnector>, arbscan::ArbscanError> {
            if name == "binance" && !use_mock {
                Ok(Arc::new(arbscan_binance::BinanceConnector::new_default()?))
            } else {
                Ok(Arc::new(MockExchange::new(name).gap_every(97)))
            }
        })
        .collect()
}

/// Write two and a half days of synthetic per-minute quotes per exchange into
/// `dir`, named like `ethusdt-2022-09-{exchange}.csv`.
pub fn write_synthetic_quotes(dir: &Path) -> std::io::Result<()> {
    // 2022-09-13 12:00 UTC, so the first half day gets trimmed.
    let start = chrono::DateTime::from_timestamp(1_663_070_400, 0).unwrap_or_default();
    for (i, exchange) in EXCHANGES.iter().enumerate() {
        let skew = 0.15 * i as f64;
        let mut csv = String::from("timestamp,bid,ask,mid\n");
        for minute in 0..(60 * 60) {
            let ts = start + chrono::Duration::minutes(minute);
            let wave = (minute as f64 / 90.0).sin();
            let bid = 1600.0 + 4.0 * wave + skew;
            let ask = bid + 0.2 + 0.01 * i as f64;
            let _ = writeln!(
                csv,
                "{},{bid:.4},{ask:.4},{:.4}",
                ts.format("%Y-%m-%d %H:%M:%S"),
                (bid + ask) / 2.0
            );
        }
        std::fs::write(dir.join(format!("ethusdt-2022-09-{exchange}.csv")), csv)?;
    }
    Ok(())
}
