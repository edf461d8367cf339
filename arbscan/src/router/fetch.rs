use std::sync::Arc;

use arbscan_core::{ArbscanError, Candle, ExchangeConnector, Timeframe};

use crate::Arbscan;
use crate::core::tag_err;

impl Arbscan {
    /// Issue a single candle request to `connector`.
    ///
    /// Waits `max(connector.rate_limit_delay(), min_request_delay)` first. The
    /// returned page holds at most `limit` candles, ascending, none earlier
    /// than `since`.
    ///
    /// # Errors
    /// - `UnsupportedExchange` if the connector has no candle capability.
    /// - `InvalidTimeframe` if the connector does not serve `timeframe`.
    /// - Any connector failure, attributed to the connector.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "arbscan::router::fetch_page",
            skip(self, connector),
            fields(exchange = connector.name(), timeframe = %timeframe),
        )
    )]
    pub async fn fetch_page(
        &self,
        connector: &Arc<dyn ExchangeConnector>,
        symbol: &str,
        timeframe: Timeframe,
        since: i64,
        limit: usize,
    ) -> Result<Vec<Candle>, ArbscanError> {
        let name = connector.name();
        let provider = connector
            .as_candle_provider()
            .ok_or_else(|| ArbscanError::unsupported_exchange(name, "no candle capability"))?;
        if !provider.supported_timeframes().contains(&timeframe) {
            return Err(ArbscanError::InvalidTimeframe(format!(
                "{timeframe} not served by {name}"
            )));
        }

        let delay = connector.rate_limit_delay().max(self.cfg.min_request_delay);
        if !delay.is_zero() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "rate-limit sleep"
            );
            tokio::time::sleep(delay).await;
        }

        let mut page = provider
            .fetch_candles(symbol, timeframe, since, limit)
            .await
            .map_err(|e| tag_err(name, e))?;
        page.retain(|c| c.open_time >= since);
        page.sort_by_key(|c| c.open_time);
        page.truncate(limit);
        Ok(page)
    }
}
