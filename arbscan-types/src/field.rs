use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ArbscanError;

/// Scalar field selected from a record when projecting a series.
///
/// OHLCV candles carry `Open`..`Volume`; pre-aggregated quote rows carry
/// `Bid`, `Ask` and `Mid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    /// Candle open price.
    Open,
    /// Candle high price.
    High,
    /// Candle low price.
    Low,
    /// Candle close price.
    Close,
    /// Candle volume.
    Volume,
    /// Best bid.
    Bid,
    /// Best ask.
    Ask,
    /// Bid/ask midpoint.
    Mid,
}

impl PriceField {
    /// Quote fields processed by the file-based pipelines, in output order.
    pub const QUOTE_FIELDS: &'static [Self] = &[Self::Bid, Self::Ask, Self::Mid];

    /// Lowercase column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
            Self::Bid => "bid",
            Self::Ask => "ask",
            Self::Mid => "mid",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceField {
    type Err = ArbscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "close" => Ok(Self::Close),
            "volume" => Ok(Self::Volume),
            "bid" => Ok(Self::Bid),
            "ask" => Ok(Self::Ask),
            "mid" => Ok(Self::Mid),
            other => Err(ArbscanError::InvalidArg(format!("unknown price field `{other}`"))),
        }
    }
}

/// Reducer applied per calendar day when downsampling an aligned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DailyReducer {
    /// Arithmetic mean of the intra-day samples.
    #[default]
    Mean,
    /// Max, min and mean of the intra-day samples.
    MaxMinMean,
}
