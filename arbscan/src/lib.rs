//! Arbscan fetches candles for one symbol from several exchanges and
//! measures how far their prices drift apart.
//!
//! Overview
//! - Exchanges plug in through the `arbscan_core::ExchangeConnector` contract and
//!   are registered once on an [`ArbscanBuilder`]; each is addressed by its name.
//! - [`Arbscan::fetch_page`] issues one paced request; [`Arbscan::fetch_series`]
//!   pages through a fixed window and stitches a duplicate-free series.
//! - [`Arbscan::compare_closes`] aligns close prices across exchanges on open
//!   time and appends row-wise `max`, `min`, `mean` and `median`.
//! - The [`pipeline`] module runs the quote-file flows: pairwise bid/ask/mid
//!   differences reduced to daily max/min/mean, and daily means per exchange.
//!
//! Behavior
//! - Requests are strictly sequential. Before every request the router sleeps
//!   for the larger of the exchange's advertised delay and the configured
//!   floor; there is no retry.
//! - The fetch window defaults to one day, giving a budget of 1440, 288 or
//!   24 candles for `1m`, `5m` and `1h`.
//! - Alignment is an inner join: only timestamps every exchange reported survive.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use arbscan::{Arbscan, CompareRequest};
//!
//! let arbscan = Arbscan::builder()
//!     .with_connector(Arc::new(arbscan_binance::BinanceConnector::new_default()?))
//!     .with_connector(Arc::new(arbscan_mock::MockExchange::new("kraken")))
//!     .build()?;
//! let req = CompareRequest::new(&["binance", "kraken"], "ETH/USDT", "1m", "2022-09-14")?;
//! let report = arbscan.compare_closes(&req).await?;
//! for row in report.rows().iter().take(3) {
//!     println!("{} {:?}", row.timestamp, row.values);
//! }
//! ```
//!
//! See `arbscan/examples/` for runnable demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
#[cfg(feature = "dataframe")]
pub mod output;
pub mod pipeline;
mod router;

pub use core::{Arbscan, ArbscanBuilder, tag_err};
pub use pipeline::{
    QuoteSource, align_field, daily_means, daily_pair_stats, minute_summary, pair_differences,
};
pub use router::compare::{CompareRequest, ComparisonReport, ComparisonRow};
pub use router::stitch::StitchedSeries;

// Re-export core types for convenience
pub use arbscan_core::{
    AlignedTable, ArbscanConfig, ArbscanError, Candle, CandleProvider, ColumnSummary, Coverage,
    DailyReducer, DailyStat, DailyTable, ExchangeConnector, ExchangeKey, OutputConfig,
    PairDailyStats, PairKey, PriceField, QuoteRow, Span, StatRow, Timeframe,
};
