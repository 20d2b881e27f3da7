//! Drawdown from running peak.

/// Highest equity seen up to and including each day.
///
/// A NaN equity value poisons every peak after it.
pub fn running_max(equity: &[f64]) -> Vec<f64> {
    let mut peaks = Vec::with_capacity(equity.len());
    let mut peak = f64::NEG_INFINITY;
    for &value in equity {
        peak = if peak.is_nan() || value.is_nan() {
            f64::NAN
        } else {
            peak.max(value)
        };
        peaks.push(peak);
    }
    peaks
}

/// Percent decline from the running peak, one value per day (always <= 0).
///
/// A day that sets a new peak is exactly 0.
pub fn drawdown_series(equity: &[f64]) -> Vec<f64> {
    equity
        .iter()
        .zip(running_max(equity))
        .map(|(&value, peak)| (value / peak - 1.0) * 100.0)
        .collect()
}

/// Deepest drawdown in percent (0 for a never-declining curve, 0 for empty input).
///
/// NaN if any day's drawdown is NaN.
pub fn max_drawdown(drawdown: &[f64]) -> f64 {
    if drawdown.iter().any(|d| d.is_nan()) {
        return f64::NAN;
    }
    drawdown.iter().copied().fold(0.0, f64::min)
}
