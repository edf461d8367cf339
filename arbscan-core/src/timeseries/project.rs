use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};

use crate::{ArbscanError, PriceField, Record};

/// Scalar series for one exchange, keyed by timestamp.
pub type ProjectedSeries = BTreeMap<DateTime<Utc>, f64>;

/// Reduce `records` to a timestamp → value series for `field`.
///
/// The first record wins when timestamps repeat.
///
/// # Errors
/// Returns `MalformedRecord` if a record's timestamp is out of range or the
/// record kind does not carry `field` (e.g. `bid` on an OHLCV candle).
pub fn project<R: Record>(records: &[R], field: PriceField) -> Result<ProjectedSeries, ArbscanError> {
    let mut out = ProjectedSeries::new();
    for r in records {
        let ts = r.timestamp()?;
        let value = r.field(field).ok_or_else(|| {
            ArbscanError::MalformedRecord(format!("record at {ts} has no `{field}` field"))
        })?;
        if let Entry::Vacant(v) = out.entry(ts) {
            v.insert(value);
        }
    }
    Ok(out)
}
