use chrono::{DateTime, Utc};

use super::project::ProjectedSeries;
use super::stats::RESERVED_COLUMNS;
use crate::ArbscanError;

/// A named column of values parallel to a table's timestamp index.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<f64>,
}

impl Column {
    /// Create a column from a name and its values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values, one per index row.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn retain_mask(&mut self, keep: &[bool]) {
        let mut it = keep.iter();
        self.values.retain(|_| *it.next().unwrap_or(&false));
    }
}

/// Timestamp-indexed table with one source column per exchange.
///
/// Source columns hold exchange values and are the only inputs to row-wise
/// statistics. Derived columns (`max`, `min`, `mean`, `median`, pair
/// differences) are appended after alignment and never feed back into
/// aggregation.
///
/// Invariants:
/// - the index is strictly ascending;
/// - every source and derived column has exactly one value per index row;
/// - source column names are unique and disjoint from [`RESERVED_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedTable {
    index: Vec<DateTime<Utc>>,
    sources: Vec<Column>,
    derived: Vec<Column>,
}

impl AlignedTable {
    /// Empty table with no exchanges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding a single exchange series.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `exchange` is a reserved derived-column name.
    pub fn from_series(
        exchange: impl Into<String>,
        series: &ProjectedSeries,
    ) -> Result<Self, ArbscanError> {
        let mut table = Self::new();
        table.inner_join(exchange, series)?;
        Ok(table)
    }

    /// Timestamp index, ascending.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Per-exchange columns in join order.
    #[must_use]
    pub fn sources(&self) -> &[Column] {
        &self.sources
    }

    /// Columns appended after alignment.
    #[must_use]
    pub fn derived(&self) -> &[Column] {
        &self.derived
    }

    /// Exchange identifiers in join order.
    pub fn exchanges(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(Column::name)
    }

    /// Source column for `exchange`.
    #[must_use]
    pub fn source(&self, exchange: &str) -> Option<&Column> {
        self.sources.iter().find(|c| c.name == exchange)
    }

    /// Any column (source first, then derived) named `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.source(name)
            .or_else(|| self.derived.iter().find(|c| c.name == name))
    }

    /// All columns: sources in join order followed by derived columns.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.sources.iter().chain(self.derived.iter())
    }

    /// Exchange values of row `row`, in source-column order.
    #[must_use]
    pub fn source_row(&self, row: usize) -> Vec<f64> {
        self.sources.iter().map(|c| c.values[row]).collect()
    }

    /// Copy of this table without any derived columns.
    #[must_use]
    pub fn restrict_to_sources(&self) -> Self {
        Self {
            index: self.index.clone(),
            sources: self.sources.clone(),
            derived: Vec::new(),
        }
    }

    /// Inner-join `series` as a new source column named `exchange`.
    ///
    /// Rows whose timestamp is absent from `series` are dropped from every
    /// existing column. Joining into a table with no sources adopts the
    /// series' timestamps as the index.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `exchange` is already a column or is a
    /// reserved derived-column name.
    pub fn inner_join(
        &mut self,
        exchange: impl Into<String>,
        series: &ProjectedSeries,
    ) -> Result<(), ArbscanError> {
        let exchange = exchange.into();
        if RESERVED_COLUMNS.contains(&exchange.as_str()) {
            return Err(ArbscanError::InvalidArg(format!(
                "exchange identifier `{exchange}` collides with a derived column"
            )));
        }
        if self.column(&exchange).is_some() {
            return Err(ArbscanError::InvalidArg(format!(
                "duplicate exchange column `{exchange}`"
            )));
        }

        if self.sources.is_empty() {
            self.index = series.keys().copied().collect();
            self.sources
                .push(Column::new(exchange, series.values().copied().collect()));
            self.derived.clear();
            return Ok(());
        }

        let keep: Vec<bool> = self.index.iter().map(|ts| series.contains_key(ts)).collect();
        let mut values = Vec::with_capacity(self.index.len());
        for ts in &self.index {
            if let Some(v) = series.get(ts) {
                values.push(*v);
            }
        }
        let mut it = keep.iter();
        self.index.retain(|_| *it.next().unwrap_or(&false));
        for c in self.sources.iter_mut().chain(self.derived.iter_mut()) {
            c.retain_mask(&keep);
        }
        self.sources.push(Column::new(exchange, values));
        Ok(())
    }

    /// Append a derived column, replacing an existing derived column of the same name.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `name` is an exchange column or `values` does
    /// not match the row count.
    pub fn set_derived(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), ArbscanError> {
        let name = name.into();
        if self.source(&name).is_some() {
            return Err(ArbscanError::InvalidArg(format!(
                "derived column `{name}` collides with an exchange column"
            )));
        }
        if values.len() != self.index.len() {
            return Err(ArbscanError::InvalidArg(format!(
                "derived column `{name}` has {} values for {} rows",
                values.len(),
                self.index.len()
            )));
        }
        if let Some(existing) = self.derived.iter_mut().find(|c| c.name == name) {
            existing.values = values;
        } else {
            self.derived.push(Column::new(name, values));
        }
        Ok(())
    }

    /// Rows `[start, end)` as a new table.
    pub(crate) fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.index.len());
        let start = start.min(end);
        let cut = |c: &Column| Column::new(c.name.clone(), c.values[start..end].to_vec());
        Self {
            index: self.index[start..end].to_vec(),
            sources: self.sources.iter().map(cut).collect(),
            derived: self.derived.iter().map(cut).collect(),
        }
    }
}

/// Inner-join per-exchange series on timestamp.
///
/// The first series seeds the table; each following series is joined in
/// turn, adding one column named by its exchange identifier. The resulting
/// row set is the intersection of all input timestamp sets, whatever the
/// merge order; only column order follows the input order.
///
/// # Errors
/// Returns `InvalidArg` on duplicate exchange identifiers or identifiers that
/// collide with reserved derived-column names.
pub fn align<I, S>(series: I) -> Result<AlignedTable, ArbscanError>
where
    I: IntoIterator<Item = (S, ProjectedSeries)>,
    S: Into<String>,
{
    let mut table = AlignedTable::new();
    for (exchange, s) in series {
        table.inner_join(exchange, &s)?;
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "arbscan::align",
        rows = table.len(),
        exchanges = table.sources.len(),
        "aligned series"
    );
    Ok(table)
}
