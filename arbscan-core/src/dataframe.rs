//! Conversions to `polars` dataframes and CSV input/output.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{
    Column as PlColumn, CsvReadOptions, CsvWriter, DataFrame, DataType, NamedFrom, SerReader,
    SerWriter,
};

use crate::date::{format_timestamp, ms_to_datetime, parse_timestamp};
use crate::files::exchange_from_file_stem;
use crate::timeseries::align::AlignedTable;
use crate::timeseries::resample::{DailyTable, PairDailyStats};
use crate::{ArbscanError, QuoteRow};

/// Columns a quote CSV must carry.
pub const QUOTE_COLUMNS: [&str; 4] = ["timestamp", "bid", "ask", "mid"];

fn data_err(e: impl std::fmt::Display) -> ArbscanError {
    ArbscanError::Data(e.to_string())
}

/// Conversion of an arbscan table into a `polars` [`DataFrame`].
pub trait ToDataFrame {
    /// Build a dataframe holding this table's rows.
    ///
    /// # Errors
    /// Returns `Data` if polars rejects the column set.
    fn to_dataframe(&self) -> Result<DataFrame, ArbscanError>;
}

impl ToDataFrame for AlignedTable {
    /// Columns: `unix` (ms), `timestamp` (`%Y-%m-%d %H:%M:%S`), exchange
    /// columns, then derived columns.
    fn to_dataframe(&self) -> Result<DataFrame, ArbscanError> {
        let unix: Vec<i64> = self.index().iter().map(chrono::DateTime::timestamp_millis).collect();
        let human: Vec<String> = self.index().iter().map(|ts| format_timestamp(*ts)).collect();
        let mut cols = vec![
            PlColumn::new("unix".into(), unix),
            PlColumn::new("timestamp".into(), human),
        ];
        cols.extend(
            self.columns()
                .map(|c| PlColumn::new(c.name().into(), c.values().to_vec())),
        );
        DataFrame::new(cols).map_err(data_err)
    }
}

impl ToDataFrame for DailyTable {
    fn to_dataframe(&self) -> Result<DataFrame, ArbscanError> {
        let days: Vec<String> = self.days().iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
        let mut cols = vec![PlColumn::new("timestamp".into(), days)];
        cols.extend(
            self.columns()
                .iter()
                .map(|c| PlColumn::new(c.name().into(), c.values().to_vec())),
        );
        DataFrame::new(cols).map_err(data_err)
    }
}

impl ToDataFrame for PairDailyStats {
    /// Columns: `timestamp` (day), `max`, `min`, `mean`.
    fn to_dataframe(&self) -> Result<DataFrame, ArbscanError> {
        let days: Vec<String> = self.rows.iter().map(|r| r.day.format("%Y-%m-%d").to_string()).collect();
        let max: Vec<f64> = self.rows.iter().map(|r| r.max).collect();
        let min: Vec<f64> = self.rows.iter().map(|r| r.min).collect();
        let mean: Vec<f64> = self.rows.iter().map(|r| r.mean).collect();
        DataFrame::new(vec![
            PlColumn::new("timestamp".into(), days),
            PlColumn::new("max".into(), max),
            PlColumn::new("min".into(), min),
            PlColumn::new("mean".into(), mean),
        ])
        .map_err(data_err)
    }
}

/// Write `df` to `path` as CSV with a header row.
///
/// Parent directories are created when missing.
///
/// # Errors
/// Returns `Data` on I/O or serialization failure.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), ArbscanError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(data_err)?;
    }
    let mut file = File::create(path).map_err(data_err)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(data_err)
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, ArbscanError> {
    let col = df
        .column(name)
        .map_err(|_| ArbscanError::MalformedRecord(format!("missing column `{name}`")))?;
    let cast = col
        .cast(&DataType::Float64)
        .map_err(|e| ArbscanError::MalformedRecord(format!("column `{name}`: {e}")))?;
    let values = cast.f64().map_err(data_err)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn timestamp_column(
    df: &DataFrame,
    name: &str,
) -> Result<Vec<chrono::DateTime<chrono::Utc>>, ArbscanError> {
    let col = df
        .column(name)
        .map_err(|_| ArbscanError::MalformedRecord(format!("missing column `{name}`")))?;
    if col.dtype() == &DataType::String {
        let raw = col.str().map_err(data_err)?;
        raw.into_iter()
            .map(|v| {
                v.ok_or_else(|| ArbscanError::MalformedRecord("empty timestamp".into()))
                    .and_then(parse_timestamp)
            })
            .collect()
    } else {
        // Numeric timestamps are milliseconds since the epoch.
        let cast = col
            .cast(&DataType::Int64)
            .map_err(|e| ArbscanError::MalformedRecord(format!("column `{name}`: {e}")))?;
        let raw = cast.i64().map_err(data_err)?;
        raw.into_iter()
            .map(|v| {
                v.ok_or_else(|| ArbscanError::MalformedRecord("empty timestamp".into()))
                    .and_then(ms_to_datetime)
            })
            .collect()
    }
}

/// Read a quote CSV with at least `timestamp, bid, ask, mid` columns.
///
/// # Errors
/// Returns `MalformedRecord` if a required column is missing or a timestamp
/// cannot be parsed, and `Data` on I/O failure.
#[cfg_attr(feature = "tracing", tracing::instrument(target = "arbscan::dataframe", skip_all, fields(path = %path.display())))]
pub fn read_quote_csv(path: &Path) -> Result<Vec<QuoteRow>, ArbscanError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(data_err)?
        .finish()
        .map_err(data_err)?;

    let [ts_col, bid_col, ask_col, mid_col] = QUOTE_COLUMNS;
    let ts = timestamp_column(&df, ts_col)?;
    let bid = float_column(&df, bid_col)?;
    let ask = float_column(&df, ask_col)?;
    let mid = float_column(&df, mid_col)?;

    let rows: Vec<QuoteRow> = ts
        .into_iter()
        .zip(bid)
        .zip(ask)
        .zip(mid)
        .map(|(((ts, bid), ask), mid)| QuoteRow { ts, bid, ask, mid })
        .collect();
    #[cfg(feature = "tracing")]
    tracing::debug!(target: "arbscan::dataframe", rows = rows.len(), "read quote file");
    Ok(rows)
}

/// Load every `*.csv` file in `dir` as `(exchange, rows)`, sorted by file name.
///
/// The exchange identifier comes from [`exchange_from_file_stem`].
///
/// # Errors
/// Propagates directory, naming and parsing failures.
pub fn load_quote_dir(dir: &Path) -> Result<Vec<(String, Vec<QuoteRow>)>, ArbscanError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(data_err)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")))
        .collect();
    paths.sort();
    paths
        .iter()
        .map(|p| Ok((exchange_from_file_stem(p)?, read_quote_csv(p)?)))
        .collect()
}
