use std::time::Duration;

use async_trait::async_trait;

use crate::{ArbscanError, Candle, ExchangeKey, Timeframe};

/// Focused role trait for connectors that serve historical candles.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Fetch at most `limit` candles of `timeframe` for `symbol`, starting at
    /// `since` (inclusive, ms since epoch).
    ///
    /// Implementations issue exactly one request; pacing is the caller's job.
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: i64,
        limit: usize,
    ) -> Result<Vec<Candle>, ArbscanError>;

    /// Timeframes this connector can natively serve. Defaults to all of them.
    fn supported_timeframes(&self) -> &'static [Timeframe] {
        Timeframe::ALL
    }
}

/// Main connector trait implemented per exchange adapter.
pub trait ExchangeConnector: Send + Sync {
    /// Exchange identifier, also used as the column name in aligned tables
    /// (e.g. "binance", "kucoin").
    fn name(&self) -> &'static str;

    /// Typed registry key constructed from the static name.
    fn key(&self) -> ExchangeKey {
        ExchangeKey::new(self.name())
    }

    /// Minimum delay the exchange mandates between consecutive requests.
    fn rate_limit_delay(&self) -> Duration {
        Duration::ZERO
    }

    /// Advertise candle capability by returning a usable trait object reference when supported.
    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        None
    }

    /// Whether this exchange can serve candles at all.
    fn supports_candles(&self) -> bool {
        self.as_candle_provider().is_some()
    }
}
