use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::align::AlignedTable;
use super::util;
use crate::ArbscanError;

/// Names of the aggregate columns appended by [`append_aggregate_stats`].
pub const RESERVED_COLUMNS: [&str; 4] = ["max", "min", "mean", "median"];

/// Row-wise aggregates over a table's exchange columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    /// Row timestamp.
    pub ts: DateTime<Utc>,
    /// Highest exchange value.
    pub max: f64,
    /// Lowest exchange value.
    pub min: f64,
    /// Mean of exchange values.
    pub mean: f64,
    /// Median of exchange values.
    pub median: f64,
}

/// Compute max/min/mean/median for every row over the source columns only.
///
/// Derived columns already present on the table are ignored, so repeated
/// calls produce identical results.
#[must_use]
pub fn aggregate_stats(table: &AlignedTable) -> Vec<StatRow> {
    table
        .index()
        .iter()
        .enumerate()
        .map(|(row, ts)| {
            let values = table.source_row(row);
            StatRow {
                ts: *ts,
                max: util::max(&values),
                min: util::min(&values),
                mean: util::mean(&values),
                median: util::median(&values),
            }
        })
        .collect()
}

/// Append (or refresh) the `max`, `min`, `mean`, `median` columns.
///
/// # Errors
/// Returns `InvalidArg` only if a reserved name somehow names a source column.
pub fn append_aggregate_stats(table: &mut AlignedTable) -> Result<(), ArbscanError> {
    let rows = aggregate_stats(table);
    table.set_derived("max", rows.iter().map(|r| r.max).collect())?;
    table.set_derived("min", rows.iter().map(|r| r.min).collect())?;
    table.set_derived("mean", rows.iter().map(|r| r.mean).collect())?;
    table.set_derived("median", rows.iter().map(|r| r.median).collect())?;
    Ok(())
}

/// Unordered pair of exchanges, rendered `"{a}-{b}"` in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    a: String,
    b: String,
}

impl PairKey {
    /// Pair `a` with `b`; `a` is the exchange encountered first.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// First exchange of the pair.
    #[must_use]
    pub fn a(&self) -> &str {
        &self.a
    }

    /// Second exchange of the pair.
    #[must_use]
    pub fn b(&self) -> &str {
        &self.b
    }

    /// Column name for this pair's difference series.
    #[must_use]
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// All 2-combinations of `exchanges`, in first-seen order.
///
/// Repeated identifiers are ignored after their first appearance.
#[must_use]
pub fn pair_keys<S: AsRef<str>>(exchanges: &[S]) -> Vec<PairKey> {
    let mut seen: Vec<&str> = Vec::with_capacity(exchanges.len());
    for e in exchanges {
        let e = e.as_ref();
        if !seen.contains(&e) {
            seen.push(e);
        }
    }
    let mut out = Vec::with_capacity(seen.len() * seen.len().saturating_sub(1) / 2);
    for (i, a) in seen.iter().enumerate() {
        for b in &seen[i + 1..] {
            out.push(PairKey::new(*a, *b));
        }
    }
    out
}

/// Append one `a-b` column per pair holding `|value[a] - value[b]|`.
///
/// # Errors
/// Returns `UnknownExchangeColumn` if either side of a pair is not an
/// exchange column of `table`. No column is appended in that case.
pub fn append_pairwise_diffs(table: &mut AlignedTable, pairs: &[PairKey]) -> Result<(), ArbscanError> {
    let mut columns = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let a = table
            .source(pair.a())
            .ok_or_else(|| ArbscanError::UnknownExchangeColumn(pair.a().to_string()))?;
        let b = table
            .source(pair.b())
            .ok_or_else(|| ArbscanError::UnknownExchangeColumn(pair.b().to_string()))?;
        let diffs: Vec<f64> = a
            .values()
            .iter()
            .zip(b.values())
            .map(|(x, y)| (x - y).abs())
            .collect();
        columns.push((pair.name(), diffs));
    }
    for (name, values) in columns {
        table.set_derived(name, values)?;
    }
    Ok(())
}

/// Summary of one column over all rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name.
    pub column: String,
    /// Number of non-NaN values.
    pub count: usize,
    /// Mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Minimum.
    pub min: f64,
    /// Median.
    pub median: f64,
    /// Maximum.
    pub max: f64,
}

/// Describe the named columns of `table`.
///
/// # Errors
/// Returns `InvalidArg` if a name is neither a source nor a derived column.
pub fn describe<S: AsRef<str>>(table: &AlignedTable, columns: &[S]) -> Result<Vec<ColumnSummary>, ArbscanError> {
    columns
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let col = table
                .column(name)
                .ok_or_else(|| ArbscanError::InvalidArg(format!("unknown column `{name}`")))?;
            let v = col.values();
            Ok(ColumnSummary {
                column: name.to_string(),
                count: v.iter().filter(|x| !x.is_nan()).count(),
                mean: util::mean(v),
                std: util::sample_std(v),
                min: util::min(v),
                median: util::median(v),
                max: util::max(v),
            })
        })
        .collect()
}
