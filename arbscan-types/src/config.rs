//! Configuration types shared across the orchestrator and pipelines.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ArbscanError, MS_PER_DAY, Timeframe};

/// Acquisition settings for the `Arbscan` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArbscanConfig {
    /// Length of the fetch window starting at the requested day.
    ///
    /// The exclusive end bound is `since + fetch_window`; the record budget is
    /// the number of candles of the chosen timeframe that fit in the window.
    pub fetch_window: Duration,
    /// Optional cap on the number of candles requested per page.
    pub page_limit: Option<usize>,
    /// Lower bound on the delay before every page request. The effective delay
    /// is the larger of this and the exchange's own rate-limit delay.
    pub min_request_delay: Duration,
}

impl Default for ArbscanConfig {
    fn default() -> Self {
        Self {
            fetch_window: Duration::from_millis(MS_PER_DAY.unsigned_abs()),
            page_limit: None,
            min_request_delay: Duration::ZERO,
        }
    }
}

impl ArbscanConfig {
    /// Fetch window in milliseconds.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the window is zero or does not fit in `i64`.
    pub fn fetch_window_ms(&self) -> Result<i64, ArbscanError> {
        let ms = i64::try_from(self.fetch_window.as_millis())
            .map_err(|_| ArbscanError::InvalidArg("fetch window too large".into()))?;
        if ms <= 0 {
            return Err(ArbscanError::InvalidArg("fetch window must be positive".into()));
        }
        Ok(ms)
    }

    /// Candle budget for one exchange run at `timeframe`.
    ///
    /// A one-day window yields the timeframe's per-day candle count.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the fetch window is invalid.
    pub fn record_budget(&self, timeframe: Timeframe) -> Result<usize, ArbscanError> {
        let window = self.fetch_window_ms()?;
        let budget = window / timeframe.step_ms();
        usize::try_from(budget).map_err(|_| ArbscanError::InvalidArg("record budget overflow".into()))
    }
}

/// Where and how pipeline results are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving output files.
    pub dir: PathBuf,
    /// Decimal places for per-minute and daily-mean outputs.
    pub minute_precision: u32,
    /// Decimal places for daily difference statistics.
    pub daily_precision: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            minute_precision: 2,
            daily_precision: 3,
        }
    }
}
