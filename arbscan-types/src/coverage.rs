//! Coverage of fetched series: which exchange supplied which time range.

/// A closed range of timestamps `[start..=end]` in milliseconds since epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start timestamp (ms).
    pub start: i64,
    /// Inclusive end timestamp (ms).
    pub end: i64,
}

/// What one exchange contributed to a comparison run.
///
/// Built after stitching, before alignment, so `records` counts rows that may
/// later be dropped by the inner join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    /// Exchange identifier.
    pub exchange: String,
    /// Number of candles fetched.
    pub records: usize,
    /// Number of page requests issued.
    pub pages: usize,
    /// First and last candle timestamps, absent when nothing was fetched.
    pub span: Option<Span>,
}

impl Coverage {
    /// Create an empty coverage record for an exchange.
    #[must_use]
    pub const fn new(exchange: String) -> Self {
        Self {
            exchange,
            records: 0,
            pages: 0,
            span: None,
        }
    }

    /// Extend the covered span with one timestamp.
    pub fn observe(&mut self, ts: i64) {
        self.records += 1;
        self.span = Some(match self.span {
            Some(s) => Span {
                start: s.start.min(ts),
                end: s.end.max(ts),
            },
            None => Span { start: ts, end: ts },
        });
    }
}
