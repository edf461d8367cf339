use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ArbscanError;

/// Milliseconds in one UTC day.
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Candle duration accepted by the acquisition pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    /// One-minute candles.
    #[serde(rename = "1m")]
    M1,
    /// Five-minute candles.
    #[serde(rename = "5m")]
    M5,
    /// One-hour candles.
    #[serde(rename = "1h")]
    H1,
}

impl Timeframe {
    /// Every supported timeframe, finest first.
    pub const ALL: &'static [Self] = &[Self::M1, Self::M5, Self::H1];

    /// Exchange-facing identifier (`1m`, `5m`, `1h`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::H1 => "1h",
        }
    }

    /// Number of candles covering one UTC day.
    #[must_use]
    pub const fn candles_per_day(self) -> i64 {
        match self {
            Self::M1 => 1440,
            Self::M5 => 288,
            Self::H1 => 24,
        }
    }

    /// Length of one candle in milliseconds.
    #[must_use]
    pub const fn step_ms(self) -> i64 {
        MS_PER_DAY / self.candles_per_day()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ArbscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| ArbscanError::InvalidTimeframe(s.to_string()))
    }
}
