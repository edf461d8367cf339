use arbscan_core::{
    AlignedTable, ArbscanError, Coverage, PriceField, Timeframe, align, append_aggregate_stats,
    determine_ms_timestamp, format_timestamp, project,
};

use crate::Arbscan;

/// Inputs of a close-price comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRequest {
    exchanges: Vec<String>,
    symbol: String,
    timeframe: Timeframe,
    day: String,
}

impl CompareRequest {
    /// Validate and build a request.
    ///
    /// # Errors
    /// - `InvalidDateFormat` if `day` is not `YYYY-MM-DD`.
    /// - `InvalidTimeframe` if `timeframe` is not `1m`, `5m` or `1h`.
    /// - `InvalidArg` if `exchanges` is empty.
    pub fn new<S: AsRef<str>>(
        exchanges: &[S],
        symbol: impl Into<String>,
        timeframe: &str,
        day: &str,
    ) -> Result<Self, ArbscanError> {
        determine_ms_timestamp(day)?;
        let timeframe: Timeframe = timeframe.parse()?;
        if exchanges.is_empty() {
            return Err(ArbscanError::InvalidArg("at least one exchange is required".into()));
        }
        Ok(Self {
            exchanges: exchanges.iter().map(|e| e.as_ref().to_string()).collect(),
            symbol: symbol.into(),
            timeframe,
            day: day.to_string(),
        })
    }

    /// Exchanges in processing order.
    #[must_use]
    pub fn exchanges(&self) -> &[String] {
        &self.exchanges
    }

    /// Trading symbol, e.g. `ETH/USDT`.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Candle timeframe.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Start day, `YYYY-MM-DD`.
    #[must_use]
    pub fn day(&self) -> &str {
        &self.day
    }
}

/// Close prices aligned across exchanges with per-row aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    /// Exchange close columns followed by `max`, `min`, `mean`, `median`.
    pub table: AlignedTable,
    /// Per-exchange fetch coverage, in processing order.
    pub coverage: Vec<Coverage>,
    /// Compared symbol.
    pub symbol: String,
    /// Candle timeframe.
    pub timeframe: Timeframe,
    /// Window start, ms since epoch.
    pub since: i64,
}

/// One rendered row of a [`ComparisonReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Open time, ms since epoch.
    pub unix: i64,
    /// `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Exchange closes then `max`, `min`, `mean`, `median`.
    pub values: Vec<f64>,
}

impl ComparisonReport {
    /// Column headers matching [`ComparisonReport::rows`].
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        let mut out = vec!["unix".to_string(), "timestamp".to_string()];
        out.extend(self.table.columns().map(|c| c.name().to_string()));
        out
    }

    /// Rows as `(unix, timestamp, exchange values…, max, min, mean, median)`.
    #[must_use]
    pub fn rows(&self) -> Vec<ComparisonRow> {
        self.table
            .index()
            .iter()
            .enumerate()
            .map(|(i, ts)| ComparisonRow {
                unix: ts.timestamp_millis(),
                timestamp: format_timestamp(*ts),
                values: self.table.columns().map(|c| c.values()[i]).collect(),
            })
            .collect()
    }
}

impl Arbscan {
    /// Fetch `symbol` from each requested exchange in order, align the close
    /// prices on open time and append row aggregates.
    ///
    /// Exchanges are processed one at a time; each is fully paginated before
    /// the next begins.
    ///
    /// # Errors
    /// The first failure aborts the run: `UnsupportedExchange` for unknown
    /// identifiers, fetch failures from [`Arbscan::fetch_series`], or
    /// `MalformedRecord` from projection.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "arbscan::router::compare_closes",
            skip(self, req),
            fields(symbol = %req.symbol, timeframe = %req.timeframe, day = %req.day),
        )
    )]
    pub async fn compare_closes(
        &self,
        req: &CompareRequest,
    ) -> Result<ComparisonReport, ArbscanError> {
        let since = determine_ms_timestamp(&req.day)?;
        let mut series = Vec::with_capacity(req.exchanges.len());
        let mut coverage = Vec::with_capacity(req.exchanges.len());
        for id in &req.exchanges {
            let connector = self.connector(id)?;
            let stitched = self
                .fetch_series(&connector, &req.symbol, req.timeframe, since)
                .await?;
            series.push((id.clone(), project(&stitched.candles, PriceField::Close)?));
            coverage.push(stitched.coverage);
        }

        let mut table = align(series)?;
        append_aggregate_stats(&mut table)?;
        #[cfg(feature = "tracing")]
        tracing::info!(rows = table.len(), "closes compared");
        Ok(ComparisonReport {
            table,
            coverage,
            symbol: req.symbol.clone(),
            timeframe: req.timeframe,
            since,
        })
    }
}
