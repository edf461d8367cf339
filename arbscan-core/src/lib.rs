//! arbscan-core
//!
//! Core types, traits, and utilities shared across the arbscan workspace.
//!
//! - `types`: re-exports of the shared error, timeframe, and config types.
//! - `record`: exchange-native candles and pre-aggregated quote rows.
//! - `connector`: the `ExchangeConnector` trait and the `CandleProvider` capability.
//! - `date`: day-string validation and timestamp helpers.
//! - `timeseries`: projection, timestamp alignment, cross-exchange statistics,
//!   and daily resampling.
//!
//! Every stage consumes the previous stage's output and produces a new
//! structure; the only in-place mutation is column appending on an
//! [`AlignedTable`], which never removes existing columns.
#![warn(missing_docs)]

/// Connector capability traits and the primary `ExchangeConnector` interface.
pub mod connector;
/// Day-string validation and timestamp conversions.
pub mod date;
/// Dataframe conversions and CSV input/output.
#[cfg(feature = "dataframe")]
pub mod dataframe;
/// Locating quote files and deriving exchange identifiers from their names.
pub mod files;
/// Exchange-native records.
pub mod record;
/// Time-series utilities for projection, alignment, statistics, and resampling.
pub mod timeseries;
pub mod types;

pub use connector::{CandleProvider, ExchangeConnector};
pub use date::{
    determine_ms_timestamp, format_timestamp, ms_to_datetime, parse_timestamp, validate_day_format,
};
#[cfg(feature = "dataframe")]
pub use dataframe::{QUOTE_COLUMNS, ToDataFrame, load_quote_dir, read_quote_csv, write_csv};
#[cfg(feature = "dataframe")]
pub use polars::prelude::DataFrame;
pub use files::exchange_from_file_stem;
pub use record::{Candle, QuoteRow, Record};
pub use timeseries::align::{AlignedTable, Column, align};
pub use timeseries::project::{ProjectedSeries, project};
pub use timeseries::resample::{
    DailyResample, DailyStat, DailyTable, PairDailyStats, daily_max_min_mean, daily_mean,
    resample_to_daily, trim_to_full_days,
};
pub use timeseries::stats::{
    ColumnSummary, PairKey, RESERVED_COLUMNS, StatRow, aggregate_stats, append_aggregate_stats,
    append_pairwise_diffs, describe, pair_keys,
};
pub use types::*;
