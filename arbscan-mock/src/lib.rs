//! Deterministic exchange connectors for tests and demos.
//!
//! [`MockExchange`] serves either explicit per-symbol candles or a synthetic
//! wave for a few well-known symbols. [`DynamicMockExchange`] is driven from
//! the outside through a controller and records every request it receives.
use std::collections::HashMap;
use std::time::Duration;

use arbscan_core::{ArbscanError, Candle, CandleProvider, ExchangeConnector, Timeframe};
use async_trait::async_trait;

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockExchange, FetchCall, MockBehavior};
pub use fixtures::candles::ramp;

/// Static mock exchange.
///
/// The symbol `FAIL` always yields a connector error.
pub struct MockExchange {
    name: &'static str,
    rate_limit: Duration,
    page_size: usize,
    candles: bool,
    timeframes: &'static [Timeframe],
    gap_every: Option<u64>,
    series: HashMap<String, Vec<Candle>>,
}

impl MockExchange {
    /// Mock named `name` with synthetic data and no rate limit.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rate_limit: Duration::ZERO,
            page_size: 500,
            candles: true,
            timeframes: Timeframe::ALL,
            gap_every: None,
            series: HashMap::new(),
        }
    }

    /// Serve exactly `candles` for `symbol` instead of synthetic data.
    #[must_use]
    pub fn with_series(mut self, symbol: &str, mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.open_time);
        self.series.insert(symbol.to_string(), candles);
        self
    }

    /// Cap every response at `n` candles regardless of the requested limit.
    #[must_use]
    pub const fn page_size(mut self, n: usize) -> Self {
        self.page_size = n;
        self
    }

    /// Advertise a mandatory delay between requests.
    #[must_use]
    pub const fn rate_limit(mut self, delay: Duration) -> Self {
        self.rate_limit = delay;
        self
    }

    /// Drop every `n`-th synthetic candle to simulate missing minutes.
    ///
    /// `1` drops every candle, leaving the exchange with no data; `0` disables gaps.
    #[must_use]
    pub const fn gap_every(mut self, n: u64) -> Self {
        self.gap_every = Some(n);
        self
    }

    /// Restrict the advertised timeframes.
    #[must_use]
    pub const fn timeframes(mut self, tfs: &'static [Timeframe]) -> Self {
        self.timeframes = tfs;
        self
    }

    /// Advertise no candle capability at all.
    #[must_use]
    pub const fn without_candles(mut self) -> Self {
        self.candles = false;
        self
    }

    fn maybe_fail(&self, symbol: &str) -> Result<(), ArbscanError> {
        if symbol == "FAIL" {
            return Err(ArbscanError::connector(
                self.name,
                "forced failure: fetch_candles",
            ));
        }
        Ok(())
    }
}

impl ExchangeConnector for MockExchange {
    fn name(&self) -> &'static str {
        self.name
    }

    fn rate_limit_delay(&self) -> Duration {
        self.rate_limit
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        if self.candles {
            Some(self as &dyn CandleProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl CandleProvider for MockExchange {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: i64,
        limit: usize,
    ) -> Result<Vec<Candle>, ArbscanError> {
        self.maybe_fail(symbol)?;
        let take = limit.min(self.page_size);
        if let Some(series) = self.series.get(symbol) {
            return Ok(series
                .iter()
                .filter(|c| c.open_time >= since)
                .take(take)
                .copied()
                .collect());
        }
        let base = fixtures::candles::base_price(symbol).ok_or_else(|| {
            ArbscanError::connector(self.name, format!("unknown symbol {symbol}"))
        })?;
        Ok(fixtures::candles::synthetic(
            base,
            fixtures::candles::exchange_skew(self.name),
            timeframe,
            since,
            take,
            self.gap_every,
        ))
    }

    fn supported_timeframes(&self) -> &'static [Timeframe] {
        self.timeframes
    }
}
