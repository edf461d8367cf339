use core::ops::Range;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::align::{AlignedTable, Column};
use super::util;
use crate::DailyReducer;

fn is_midnight(ts: DateTime<Utc>) -> bool {
    ts.num_seconds_from_midnight() == 0 && ts.nanosecond() == 0
}

/// Restrict `table` to whole calendar days.
///
/// Keeps rows in `[first midnight, last midnight)`. The row at the last
/// midnight opens a day with no further data and is dropped. With fewer than
/// two midnight rows the result is empty (columns are preserved).
#[must_use]
pub fn trim_to_full_days(table: &AlignedTable) -> AlignedTable {
    let index = table.index();
    let first = index.iter().position(|ts| is_midnight(*ts));
    let last = index.iter().rposition(|ts| is_midnight(*ts));
    match (first, last) {
        (Some(first), Some(last)) if first < last => table.slice(first, last),
        _ => table.slice(0, 0),
    }
}

/// Contiguous row ranges sharing a bucket key. `index` must be ascending.
fn buckets_by<K, F>(index: &[DateTime<Utc>], bucket_of: F) -> Vec<(K, Range<usize>)>
where
    K: PartialEq + Copy,
    F: Fn(DateTime<Utc>) -> K,
{
    let mut out: Vec<(K, Range<usize>)> = Vec::new();
    for (i, ts) in index.iter().enumerate() {
        let key = bucket_of(*ts);
        match out.last_mut() {
            Some((cur, range)) if *cur == key => range.end = i + 1,
            _ => out.push((key, i..i + 1)),
        }
    }
    out
}

/// Daily table: one row per calendar day, one column per input column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailyTable {
    days: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl DailyTable {
    /// Calendar days (UTC), ascending.
    #[must_use]
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Columns in input order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column named `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Number of days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no day is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Copy with every value rounded to `places` decimals.
    #[must_use]
    pub fn rounded(&self, places: u32) -> Self {
        Self {
            days: self.days.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| {
                    Column::new(
                        c.name(),
                        c.values().iter().map(|v| util::round_to(*v, places)).collect(),
                    )
                })
                .collect(),
        }
    }
}

/// Max/min/mean of one column over one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    /// Calendar day (UTC).
    pub day: NaiveDate,
    /// Highest intra-day value.
    pub max: f64,
    /// Lowest intra-day value.
    pub min: f64,
    /// Mean of intra-day values.
    pub mean: f64,
}

/// Daily max/min/mean rows for one column (typically a pair difference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairDailyStats {
    /// Source column name, e.g. `binance-kraken`.
    pub column: String,
    /// One row per fully covered day.
    pub rows: Vec<DailyStat>,
}

impl PairDailyStats {
    /// Copy with every statistic rounded to `places` decimals.
    #[must_use]
    pub fn rounded(&self, places: u32) -> Self {
        Self {
            column: self.column.clone(),
            rows: self
                .rows
                .iter()
                .map(|r| DailyStat {
                    day: r.day,
                    max: util::round_to(r.max, places),
                    min: util::round_to(r.min, places),
                    mean: util::round_to(r.mean, places),
                })
                .collect(),
        }
    }
}

/// Output of [`resample_to_daily`], shaped by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum DailyResample {
    /// Daily mean per column.
    Mean(DailyTable),
    /// Daily max/min/mean per column.
    MaxMinMean(Vec<PairDailyStats>),
}

/// Trim `table` to full days and take the daily mean of every column.
///
/// NaN samples are skipped.
#[must_use]
pub fn daily_mean(table: &AlignedTable) -> DailyTable {
    let trimmed = trim_to_full_days(table);
    let buckets = buckets_by(trimmed.index(), |ts| ts.date_naive());
    #[cfg(feature = "tracing")]
    tracing::debug!(target: "arbscan::resample", rows = trimmed.len(), days = buckets.len(), "daily mean");
    DailyTable {
        days: buckets.iter().map(|(day, _)| *day).collect(),
        columns: trimmed
            .columns()
            .map(|c| {
                Column::new(
                    c.name(),
                    buckets
                        .iter()
                        .map(|(_, r)| util::mean(&c.values()[r.clone()]))
                        .collect(),
                )
            })
            .collect(),
    }
}

/// Trim `table` to full days and take the daily max/min/mean of every column.
///
/// NaN samples are skipped.
#[must_use]
pub fn daily_max_min_mean(table: &AlignedTable) -> Vec<PairDailyStats> {
    let trimmed = trim_to_full_days(table);
    let buckets = buckets_by(trimmed.index(), |ts| ts.date_naive());
    #[cfg(feature = "tracing")]
    tracing::debug!(target: "arbscan::resample", rows = trimmed.len(), days = buckets.len(), "daily max/min/mean");
    trimmed
        .columns()
        .map(|c| PairDailyStats {
            column: c.name().to_string(),
            rows: buckets
                .iter()
                .map(|(day, r)| {
                    let v = &c.values()[r.clone()];
                    DailyStat {
                        day: *day,
                        max: util::max(v),
                        min: util::min(v),
                        mean: util::mean(v),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Trim `table` to full days and reduce each column (sources then derived)
/// per calendar day with `reducer`.
#[must_use]
pub fn resample_to_daily(table: &AlignedTable, reducer: DailyReducer) -> DailyResample {
    match reducer {
        DailyReducer::Mean => DailyResample::Mean(daily_mean(table)),
        DailyReducer::MaxMinMean => DailyResample::MaxMinMean(daily_max_min_mean(table)),
    }
}
