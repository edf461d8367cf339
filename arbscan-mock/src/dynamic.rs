use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use arbscan_core::{ArbscanError, Candle, CandleProvider, ExchangeConnector, Timeframe};

/// Instruction for how `fetch_candles` should behave for a given symbol.
#[derive(Clone)]
pub enum MockBehavior {
    /// Serve this series like an exchange would: records at or after `since`,
    /// at most `limit` of them.
    Series(Vec<Candle>),
    /// Return these pages verbatim, one per call, then empty pages.
    Pages(Vec<Vec<Candle>>),
    /// Fail immediately with the provided error.
    Fail(ArbscanError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
}

/// One recorded `fetch_candles` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    /// Requested symbol.
    pub symbol: String,
    /// Requested timeframe.
    pub timeframe: Timeframe,
    /// Inclusive start, ms since epoch.
    pub since: i64,
    /// Requested record limit.
    pub limit: usize,
    /// When the request arrived (tokio clock, so paused-time tests can inspect pacing).
    pub at: Instant,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior>,
    page_cursor: HashMap<String, usize>,
    calls: Vec<FetchCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `fetch_candles` calls for a specific symbol.
    pub async fn set_behavior(&self, symbol: &str, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.page_cursor.remove(symbol);
        guard.rules.insert(symbol.to_string(), behavior);
    }

    /// Return a copy of the request log.
    pub async fn calls(&self) -> Vec<FetchCall> {
        self.state.lock().await.calls.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.page_cursor.clear();
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockExchange {
    name: &'static str,
    rate_limit: Duration,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockExchange {
    /// Create a new dynamic mock exchange and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn ExchangeConnector>, DynamicMockController) {
        Self::with_rate_limit(name, Duration::ZERO)
    }

    /// Like [`Self::new_with_controller`] but advertising a request delay.
    #[must_use]
    pub fn with_rate_limit(
        name: &'static str,
        rate_limit: Duration,
    ) -> (Arc<dyn ExchangeConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            rate_limit,
            state,
        });
        (me as Arc<dyn ExchangeConnector>, controller)
    }
}

impl ExchangeConnector for DynamicMockExchange {
    fn name(&self) -> &'static str {
        self.name
    }

    fn rate_limit_delay(&self) -> Duration {
        self.rate_limit
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }
}

#[async_trait]
impl CandleProvider for DynamicMockExchange {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: i64,
        limit: usize,
    ) -> Result<Vec<Candle>, ArbscanError> {
        // Snapshot the behavior and advance page cursors without holding the
        // lock across the hang branch.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(FetchCall {
                symbol: symbol.to_string(),
                timeframe,
                since,
                limit,
                at: Instant::now(),
            });
            match guard.rules.get(symbol).cloned() {
                Some(MockBehavior::Pages(pages)) => {
                    let cursor = guard.page_cursor.entry(symbol.to_string()).or_insert(0);
                    let page = pages.get(*cursor).cloned().unwrap_or_default();
                    *cursor += 1;
                    Some(MockBehavior::Pages(vec![page]))
                }
                other => other,
            }
        };

        match behavior {
            Some(MockBehavior::Series(series)) => Ok(series
                .into_iter()
                .filter(|c| c.open_time >= since)
                .take(limit)
                .collect()),
            Some(MockBehavior::Pages(mut page)) => Ok(page.pop().unwrap_or_default()),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(ArbscanError::connector(
                self.name,
                format!("no behavior configured for {symbol}"),
            )),
        }
    }
}
