use arbscan_core::{Candle, Timeframe};

/// Reference price for the symbols the mock serves without explicit data.
pub fn base_price(symbol: &str) -> Option<f64> {
    match symbol {
        "ETH/USDT" => Some(1_600.0),
        "BTC/USDT" => Some(20_000.0),
        "SOL/USDT" => Some(32.0),
        _ => None,
    }
}

/// Per-exchange price offset derived from the name so that exchanges disagree
/// by a small, stable amount.
pub fn exchange_skew(name: &str) -> f64 {
    let sum: u32 = name.bytes().map(u32::from).sum();
    f64::from(sum % 17) * 0.05
}

/// Deterministic wave-shaped series starting at the first step boundary at or
/// after `since`. Steps whose ordinal is a multiple of `gap_every` are skipped,
/// so `gap_every == 1` yields nothing.
pub fn synthetic(
    base: f64,
    skew: f64,
    timeframe: Timeframe,
    since: i64,
    limit: usize,
    gap_every: Option<u64>,
) -> Vec<Candle> {
    let step = timeframe.step_ms();
    let mut t = since.div_euclid(step) * step;
    if t < since {
        t += step;
    }
    let gap = gap_every
        .filter(|n| *n > 0)
        .map(|n| i64::try_from(n).unwrap_or(i64::MAX));
    if gap == Some(1) {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(limit);
    while out.len() < limit {
        let ordinal = t.div_euclid(step);
        if gap.is_none_or(|n| ordinal.rem_euclid(n) != 0) {
            out.push(at(base, skew, t, ordinal));
        }
        t += step;
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn at(base: f64, skew: f64, open_time: i64, ordinal: i64) -> Candle {
    let phase = ordinal.rem_euclid(360) as f64 * core::f64::consts::PI / 180.0;
    let open = base + skew + phase.sin() * base * 0.001;
    let close = base + skew + phase.cos() * base * 0.001;
    Candle {
        open_time,
        open,
        high: open.max(close) + 0.5,
        low: open.min(close) - 0.5,
        close,
        volume: 10.0 + ordinal.rem_euclid(7) as f64,
    }
}

/// `n` flat candles from `start`, close rising by `step_price` each step.
#[must_use]
pub fn ramp(start: i64, timeframe: Timeframe, n: usize, first: f64, step_price: f64) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let close = first + step_price * i as f64;
            let offset = i64::try_from(i).unwrap_or(i64::MAX);
            Candle {
                open_time: start + offset * timeframe.step_ms(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
            }
        })
        .collect()
}
