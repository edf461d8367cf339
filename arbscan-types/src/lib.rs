//! Arbscan-specific error taxonomy, timeframes, and configuration primitives.
#![warn(missing_docs)]

mod config;
mod connector;
mod coverage;
mod error;
mod field;
mod timeframe;

pub use config::{ArbscanConfig, OutputConfig};
pub use connector::ExchangeKey;
pub use coverage::{Coverage, Span};
pub use error::ArbscanError;
pub use field::{DailyReducer, PriceField};
pub use timeframe::{MS_PER_DAY, Timeframe};
