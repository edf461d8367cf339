//! Shared numeric helpers for row-wise statistics.

/// Round `value` to `places` decimal places (half away from zero).
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
    (value * factor).round() / factor
}

/// Median with linear interpolation between the two middle values when the
/// count is even. NaN inputs are skipped; returns NaN if nothing remains.
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    let mut v: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
    if v.is_empty() {
        return f64::NAN;
    }
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        (v[mid - 1] + v[mid]) / 2.0
    } else {
        v[mid]
    }
}

/// Arithmetic mean, skipping NaN; NaN if nothing remains.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    let (sum, n) = values
        .iter()
        .filter(|x| !x.is_nan())
        .fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    if n == 0 {
        return f64::NAN;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = n as f64;
    sum / n
}

/// Maximum, skipping NaN; NaN if nothing remains.
#[must_use]
pub fn max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|x| !x.is_nan())
        .reduce(f64::max)
        .unwrap_or(f64::NAN)
}

/// Minimum, skipping NaN; NaN if nothing remains.
#[must_use]
pub fn min(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|x| !x.is_nan())
        .reduce(f64::min)
        .unwrap_or(f64::NAN)
}

/// Sample standard deviation (n - 1 denominator), skipping NaN.
///
/// NaN when fewer than two values remain.
#[must_use]
pub fn sample_std(values: &[f64]) -> f64 {
    let v: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
    if v.len() < 2 {
        return f64::NAN;
    }
    let m = mean(&v);
    #[allow(clippy::cast_precision_loss)]
    let denom = (v.len() - 1) as f64;
    (v.iter().map(|x| (x - m).powi(2)).sum::<f64>() / denom).sqrt()
}
