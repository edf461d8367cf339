use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the arbscan workspace.
///
/// Every variant aborts the current run; there is no retry layer above it.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArbscanError {
    /// A day string did not match `YYYY-MM-DD`, or does not name a calendar date.
    #[error("invalid date input `{input}`: should be `YYYY-MM-DD`")]
    InvalidDateFormat {
        /// The rejected input.
        input: String,
    },

    /// The timeframe is not one of `1m`, `5m`, `1h`, or the exchange does not serve it.
    #[error("invalid timeframe `{0}`")]
    InvalidTimeframe(String),

    /// Unknown exchange identifier, or an exchange without candle capability.
    #[error("unsupported exchange `{exchange}`: {reason}")]
    UnsupportedExchange {
        /// Exchange identifier as requested by the caller.
        exchange: String,
        /// Why the exchange cannot be used.
        reason: String,
    },

    /// A fetched or loaded record does not have the expected field layout.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A pairwise difference referenced a column that is not an exchange column.
    #[error("unknown exchange column `{0}`")]
    UnknownExchangeColumn(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An exchange adapter failed at the transport level.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Input/output or dataframe conversion problems.
    #[error("data issue: {0}")]
    Data(String),
}

impl ArbscanError {
    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `UnsupportedExchange` error.
    pub fn unsupported_exchange(exchange: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedExchange {
            exchange: exchange.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build an `InvalidDateFormat` error for the rejected input.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            input: input.into(),
        }
    }
}
