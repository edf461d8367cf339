//! arbscan-binance
//!
//! Binance spot connector for arbscan. Serves historical klines through the
//! public `/api/v3/klines` endpoint; no API key is required.
#![warn(missing_docs)]

/// HTTP adapter seam between the connector and the Binance REST API.
pub mod adapter;

use std::sync::Arc;
use std::time::Duration;

use arbscan_core::{
    ArbscanError, Candle, CandleProvider, ExchangeConnector, ExchangeKey, Timeframe,
};
use async_trait::async_trait;
use serde_json::Value;

use adapter::{BinanceKlines, KlinesRequest, RealAdapter};

#[cfg(not(feature = "test-adapters"))]
type KlinesAdapter = Arc<RealAdapter>;
#[cfg(feature = "test-adapters")]
type KlinesAdapter = Arc<dyn BinanceKlines>;

/// Largest page the klines endpoint returns.
pub const MAX_LIMIT: usize = 1000;

/// Connector for Binance spot markets.
pub struct BinanceConnector {
    klines: KlinesAdapter,
    rate_limit: Duration,
}

impl BinanceConnector {
    /// Static connector key.
    pub const KEY: ExchangeKey = ExchangeKey::new("binance");

    /// Delay between requests when none is configured.
    pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(50);

    /// Connector talking to the public endpoint.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, ArbscanError> {
        Ok(Self::from_adapter(&RealAdapter::new_default()?))
    }

    /// Build from a concrete `RealAdapter`, e.g. one pointed at a local server.
    #[must_use]
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        Self {
            klines: Arc::new(adapter.clone()),
            rate_limit: Self::DEFAULT_RATE_LIMIT,
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn with_adapter(klines: Arc<dyn BinanceKlines>) -> Self {
        Self {
            klines,
            rate_limit: Self::DEFAULT_RATE_LIMIT,
        }
    }

    /// Override the advertised minimum delay between requests.
    #[must_use]
    pub const fn with_rate_limit(mut self, delay: Duration) -> Self {
        self.rate_limit = delay;
        self
    }

    /// Exchange-native symbol for a unified one: `ETH/USDT` becomes `ETHUSDT`.
    #[must_use]
    pub fn market_id(symbol: &str) -> String {
        symbol
            .chars()
            .filter(|c| !matches!(c, '/' | '-' | '_'))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

fn parse_str_f64(val: &Value, what: &str) -> Result<f64, ArbscanError> {
    if let Some(s) = val.as_str() {
        s.parse::<f64>()
            .map_err(|_| ArbscanError::MalformedRecord(format!("{what}: '{s}' is not a number")))
    } else if let Some(n) = val.as_f64() {
        Ok(n)
    } else {
        Err(ArbscanError::MalformedRecord(format!(
            "{what}: unexpected value {val}"
        )))
    }
}

/// Convert one raw kline row into a [`Candle`].
///
/// Rows look like `[openTime, "open", "high", "low", "close", "volume", closeTime, ..]`.
///
/// # Errors
/// Returns `MalformedRecord` if the row is short or a field is not numeric.
pub fn parse_kline(row: &[Value]) -> Result<Candle, ArbscanError> {
    const NAMES: [&str; 6] = ["open time", "open", "high", "low", "close", "volume"];
    if row.len() < NAMES.len() {
        return Err(ArbscanError::MalformedRecord(format!(
            "kline has {} fields, expected at least 6",
            row.len()
        )));
    }
    let fields = row
        .iter()
        .zip(NAMES)
        .map(|(v, name)| parse_str_f64(v, name))
        .collect::<Result<Vec<_>, _>>()?;
    Candle::try_from_row(&fields)
}

impl ExchangeConnector for BinanceConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn rate_limit_delay(&self) -> Duration {
        self.rate_limit
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }
}

#[async_trait]
impl CandleProvider for BinanceConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "arbscan_binance::fetch_candles",
            skip(self),
            fields(timeframe = %timeframe),
        )
    )]
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: i64,
        limit: usize,
    ) -> Result<Vec<Candle>, ArbscanError> {
        let req = KlinesRequest {
            symbol: Self::market_id(symbol),
            interval: timeframe.as_str(),
            start_time: since,
            limit: limit.clamp(1, MAX_LIMIT),
        };
        let rows = self.klines.klines(req).await?;
        let candles = rows
            .iter()
            .map(|row| parse_kline(row))
            .collect::<Result<Vec<_>, _>>()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(count = candles.len(), "klines fetched");
        Ok(candles)
    }
}
