use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::ms_to_datetime;
use crate::{ArbscanError, PriceField};

/// One OHLCV candle as returned by an exchange.
///
/// `open_time` is the candle start in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle start (ms since epoch).
    pub open_time: i64,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl Candle {
    /// Parse an exchange-native row `[openTime, open, high, low, close, volume, ..]`.
    ///
    /// Extra trailing fields are ignored.
    ///
    /// # Errors
    /// Returns `MalformedRecord` if fewer than six fields are present or the
    /// open time is not a finite number.
    pub fn try_from_row(row: &[f64]) -> Result<Self, ArbscanError> {
        let &[open_time, open, high, low, close, volume, ..] = row else {
            return Err(ArbscanError::MalformedRecord(format!(
                "expected at least 6 fields, got {}",
                row.len()
            )));
        };
        if !open_time.is_finite() || open_time.fract() != 0.0 {
            return Err(ArbscanError::MalformedRecord(format!(
                "open time {open_time} is not an integer timestamp"
            )));
        }
        #[allow(clippy::cast_possible_truncation)]
        let open_time = open_time as i64;
        Ok(Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// One pre-aggregated per-minute quote row from a file source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    /// Row timestamp (UTC).
    pub ts: DateTime<Utc>,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Bid/ask midpoint.
    pub mid: f64,
}

/// A timestamped record from which scalar fields can be projected.
pub trait Record {
    /// Record timestamp.
    ///
    /// # Errors
    /// Returns `MalformedRecord` if the raw timestamp is out of range.
    fn timestamp(&self) -> Result<DateTime<Utc>, ArbscanError>;

    /// Value of `field`, or `None` if this record kind does not carry it.
    fn field(&self, field: PriceField) -> Option<f64>;
}

impl Record for Candle {
    fn timestamp(&self) -> Result<DateTime<Utc>, ArbscanError> {
        ms_to_datetime(self.open_time)
    }

    fn field(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::Open => Some(self.open),
            PriceField::High => Some(self.high),
            PriceField::Low => Some(self.low),
            PriceField::Close => Some(self.close),
            PriceField::Volume => Some(self.volume),
            PriceField::Bid | PriceField::Ask | PriceField::Mid => None,
        }
    }
}

impl Record for QuoteRow {
    fn timestamp(&self) -> Result<DateTime<Utc>, ArbscanError> {
        Ok(self.ts)
    }

    fn field(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::Bid => Some(self.bid),
            PriceField::Ask => Some(self.ask),
            PriceField::Mid => Some(self.mid),
            _ => None,
        }
    }
}
