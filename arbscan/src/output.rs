//! CSV writers for pipeline results.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use arbscan_core::{
    ArbscanError, ColumnSummary, DailyTable, PairDailyStats, PriceField, ToDataFrame, write_csv,
};
use polars::prelude::{Column, DataFrame};

use crate::ComparisonReport;

/// Write the close comparison to `path`: `unix`, `timestamp`, exchange
/// closes, `max`, `min`, `mean`, `median`.
///
/// # Errors
/// Returns `Data` on dataframe or I/O failure.
pub fn write_comparison(report: &ComparisonReport, path: &Path) -> Result<(), ArbscanError> {
    let mut df = report.table.to_dataframe()?;
    write_csv(&mut df, path)
}

/// Write one `daily_{field}_{pair}.csv` per field and pair into `dir`.
///
/// Returns the written paths in field, then pair order.
///
/// # Errors
/// Returns `Data` on dataframe or I/O failure.
pub fn write_daily_pair_stats(
    stats: &BTreeMap<PriceField, Vec<PairDailyStats>>,
    dir: &Path,
) -> Result<Vec<PathBuf>, ArbscanError> {
    let mut written = Vec::new();
    for (field, pairs) in stats {
        for pair in pairs {
            let path = dir.join(format!("daily_{field}_{}.csv", pair.column));
            write_csv(&mut pair.to_dataframe()?, &path)?;
            written.push(path);
        }
    }
    Ok(written)
}

/// Write one `daily_mean_{field}.csv` per field into `dir`.
///
/// # Errors
/// Returns `Data` on dataframe or I/O failure.
pub fn write_daily_means(
    means: &BTreeMap<PriceField, DailyTable>,
    dir: &Path,
) -> Result<Vec<PathBuf>, ArbscanError> {
    let mut written = Vec::with_capacity(means.len());
    for (field, table) in means {
        let path = dir.join(format!("daily_mean_{field}.csv"));
        write_csv(&mut table.to_dataframe()?, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Write a per-minute column summary (one row per column) to `path`.
///
/// # Errors
/// Returns `Data` on dataframe or I/O failure.
pub fn write_minute_summary(summary: &[ColumnSummary], path: &Path) -> Result<(), ArbscanError> {
    let names: Vec<&str> = summary.iter().map(|s| s.column.as_str()).collect();
    let count: Vec<u64> = summary
        .iter()
        .map(|s| u64::try_from(s.count).unwrap_or(u64::MAX))
        .collect();
    let pick = |f: fn(&ColumnSummary) -> f64| summary.iter().map(f).collect::<Vec<f64>>();
    let mut df = DataFrame::new(vec![
        Column::new("column".into(), names),
        Column::new("count".into(), count),
        Column::new("mean".into(), pick(|s| s.mean)),
        Column::new("std".into(), pick(|s| s.std)),
        Column::new("min".into(), pick(|s| s.min)),
        Column::new("median".into(), pick(|s| s.median)),
        Column::new("max".into(), pick(|s| s.max)),
    ])
    .map_err(|e| ArbscanError::Data(e.to_string()))?;
    write_csv(&mut df, path)
}
