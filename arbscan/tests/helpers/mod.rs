#![allow(dead_code)]
// Lightweight fixtures and helpers shared by router tests.
use std::sync::Arc;

use arbscan::{Arbscan, ArbscanBuilder, Candle, ExchangeConnector, QuoteRow, Timeframe};

/// Midnight UTC, 2022-09-14, in milliseconds.
pub const DAY_MS: i64 = 1_663_113_600_000;
/// The day `DAY_MS` starts.
pub const DAY: &str = "2022-09-14";
pub const ETH: &str = "ETH/USDT";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> chrono::DateTime<chrono::Utc> {
    chrono::NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hh, mm, ss))
        .expect("valid timestamp")
        .and_utc()
}

/// Flat candle whose every price equals `close`.
pub fn candle(open_time: i64, close: f64) -> Candle {
    Candle {
        open_time,
        open: close,
        high: close,
        low: close,
        close,
        volume: 1.0,
    }
}

/// `n` one-minute candles from `start`, closes counting up from 1.
pub fn minutes(start: i64, n: usize) -> Vec<Candle> {
    arbscan_mock::ramp(start, Timeframe::M1, n, 1.0, 1.0)
}

/// Builder preloaded with `connectors`.
pub fn builder_with(connectors: Vec<Arc<dyn ExchangeConnector>>) -> ArbscanBuilder {
    connectors
        .into_iter()
        .fold(Arbscan::builder(), ArbscanBuilder::with_connector)
}

/// Quote row with bid = ask = mid = `price`.
pub fn flat_quote(ts: chrono::DateTime<chrono::Utc>, price: f64) -> QuoteRow {
    QuoteRow {
        ts,
        bid: price,
        ask: price,
        mid: price,
    }
}
