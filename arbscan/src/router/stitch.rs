use std::sync::Arc;

use arbscan_core::{ArbscanError, Candle, Coverage, ExchangeConnector, Timeframe};

use crate::Arbscan;

/// Candles stitched from consecutive pages plus what was observed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct StitchedSeries {
    /// Ascending candles with unique open times inside `[since, end)`.
    pub candles: Vec<Candle>,
    /// Records, pages and covered span for the exchange.
    pub coverage: Coverage,
}

impl Arbscan {
    /// Page through `connector` from `since` until the fetch window or the
    /// record budget is exhausted.
    ///
    /// The window is `[since, since + fetch_window)`; the budget is
    /// `fetch_window / timeframe.step_ms()`. After each page the cursor moves one
    /// step past the last accepted record. An empty page ends the loop early,
    /// so a short series is a valid result.
    ///
    /// # Errors
    /// Propagates the first failure from [`Arbscan::fetch_page`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "arbscan::router::fetch_series",
            skip(self, connector),
            fields(exchange = connector.name(), timeframe = %timeframe),
        )
    )]
    pub async fn fetch_series(
        &self,
        connector: &Arc<dyn ExchangeConnector>,
        symbol: &str,
        timeframe: Timeframe,
        since: i64,
    ) -> Result<StitchedSeries, ArbscanError> {
        let end = since.saturating_add(self.cfg.fetch_window_ms()?);
        let budget = self.cfg.record_budget(timeframe)?;
        let step = timeframe.step_ms();

        let mut candles: Vec<Candle> = Vec::with_capacity(budget);
        let mut coverage = Coverage::new(connector.name().to_string());
        let mut cursor = since;

        while cursor < end && candles.len() < budget {
            let remaining = budget - candles.len();
            let limit = self.cfg.page_limit.map_or(remaining, |cap| cap.min(remaining));
            let page = self
                .fetch_page(connector, symbol, timeframe, cursor, limit)
                .await?;
            coverage.pages += 1;
            if page.is_empty() {
                break;
            }

            let before = candles.len();
            for c in page {
                if c.open_time >= end || candles.len() >= budget {
                    break;
                }
                // duplicate guard across page boundaries
                if candles.last().is_some_and(|last| c.open_time <= last.open_time) {
                    continue;
                }
                coverage.observe(c.open_time);
                candles.push(c);
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(
                accepted = candles.len() - before,
                total = candles.len(),
                budget,
                "page stitched"
            );

            let Some(last) = candles.last() else { break };
            if candles.len() == before {
                break;
            }
            cursor = last.open_time.saturating_add(step);
        }

        #[cfg(feature = "tracing")]
        tracing::info!(records = candles.len(), pages = coverage.pages, "series fetched");
        Ok(StitchedSeries { candles, coverage })
    }
}
