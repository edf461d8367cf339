//! Re-export of foundational types from `arbscan-types`.
// Consolidated re-exports so downstream crates can depend on `arbscan-core` only

pub use arbscan_types::{
    ArbscanConfig, ArbscanError, Coverage, DailyReducer, ExchangeKey, MS_PER_DAY, OutputConfig,
    PriceField, Span, Timeframe,
};
