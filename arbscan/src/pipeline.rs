//! Quote-file pipelines: bid/ask/mid series per exchange reduced to daily
//! spread statistics or daily means.

use std::collections::BTreeMap;

use arbscan_core::{
    AlignedTable, ArbscanError, ColumnSummary, DailyTable, PairDailyStats, PriceField, QuoteRow,
    align, append_pairwise_diffs, daily_max_min_mean, daily_mean, describe, pair_keys, project,
};

/// Pre-aggregated quote rows for one exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSource {
    /// Exchange identifier, used as column name.
    pub exchange: String,
    /// Rows in any order; duplicates keep the first occurrence.
    pub rows: Vec<QuoteRow>,
}

impl QuoteSource {
    /// Pair an exchange identifier with its rows.
    pub fn new(exchange: impl Into<String>, rows: Vec<QuoteRow>) -> Self {
        Self {
            exchange: exchange.into(),
            rows,
        }
    }
}

/// Align one quote field across all sources.
///
/// # Errors
/// Returns `InvalidArg` on duplicate exchange identifiers and
/// `MalformedRecord` for fields quote rows do not carry.
pub fn align_field(sources: &[QuoteSource], field: PriceField) -> Result<AlignedTable, ArbscanError> {
    let series = sources
        .iter()
        .map(|s| Ok((s.exchange.clone(), project(&s.rows, field)?)))
        .collect::<Result<Vec<_>, ArbscanError>>()?;
    align(series)
}

/// Aligned `field` table with one `a-b` absolute-difference column per
/// exchange pair.
///
/// # Errors
/// See [`align_field`].
pub fn pair_differences(
    sources: &[QuoteSource],
    field: PriceField,
) -> Result<AlignedTable, ArbscanError> {
    let mut table = align_field(sources, field)?;
    let exchanges: Vec<&str> = sources.iter().map(|s| s.exchange.as_str()).collect();
    append_pairwise_diffs(&mut table, &pair_keys(&exchanges))?;
    Ok(table)
}

/// Daily max/min/mean of every pairwise difference, per quote field.
///
/// Rows outside whole calendar days are trimmed first. Values are rounded
/// to `precision` places.
///
/// # Errors
/// See [`align_field`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "arbscan::pipeline::daily_pair_stats", skip(sources), fields(sources = sources.len()))
)]
pub fn daily_pair_stats(
    sources: &[QuoteSource],
    precision: u32,
) -> Result<BTreeMap<PriceField, Vec<PairDailyStats>>, ArbscanError> {
    let mut out = BTreeMap::new();
    for &field in PriceField::QUOTE_FIELDS {
        let table = pair_differences(sources, field)?;
        let pairs: Vec<PairDailyStats> = daily_max_min_mean(&table)
            .into_iter()
            .filter(|s| table.source(&s.column).is_none())
            .map(|s| s.rounded(precision))
            .collect();
        out.insert(field, pairs);
    }
    Ok(out)
}

/// Daily mean of each exchange's series, per quote field.
///
/// # Errors
/// See [`align_field`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "arbscan::pipeline::daily_means", skip(sources), fields(sources = sources.len()))
)]
pub fn daily_means(
    sources: &[QuoteSource],
    precision: u32,
) -> Result<BTreeMap<PriceField, DailyTable>, ArbscanError> {
    let mut out = BTreeMap::new();
    for &field in PriceField::QUOTE_FIELDS {
        let table = align_field(sources, field)?;
        out.insert(field, daily_mean(&table).rounded(precision));
    }
    Ok(out)
}

/// Per-minute description of the requested columns of a difference table.
///
/// # Errors
/// Returns `InvalidArg` for unknown column names.
pub fn minute_summary<S: AsRef<str>>(
    table: &AlignedTable,
    columns: &[S],
) -> Result<Vec<ColumnSummary>, ArbscanError> {
    describe(table, columns)
}
