use serde::Serialize;

use super::stats::{mean, sample_std};
use crate::config::TRADING_DAYS_PER_YEAR;

/// Default trailing window for rolling Sharpe
pub const DEFAULT_ROLLING_WINDOW: usize = 60;

/// Default bucket count for the returns histogram
pub const DEFAULT_HISTOGRAM_BINS: usize = 40;

/// Annualized Sharpe over a trailing window, one value per day.
///
/// Uses sample std (n - 1). Days before the first full window are NaN.
pub fn rolling_sharpe(returns: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; returns.len()];
    if window < 2 || window > returns.len() {
        return out;
    }

    for end in window..=returns.len() {
        let slice = &returns[end - window..end];
        out[end - 1] = mean(slice) / sample_std(slice) * TRADING_DAYS_PER_YEAR.sqrt();
    }
    out
}

/// Equal-width histogram of daily returns in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnHistogram {
    /// Bin boundaries, `counts.len() + 1` values
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Mean daily return in percent
    pub mean_pct: f64,
}

impl ReturnHistogram {
    /// Bin returns (as percent) between their min and max.
    ///
    /// The last bin includes its right edge. A constant series is centered in
    /// a unit-wide range.
    pub fn build(returns: &[f64], bins: usize) -> Self {
        let pct: Vec<f64> = returns.iter().map(|r| r * 100.0).collect();
        let mean_pct = mean(&pct);

        if pct.is_empty() || bins == 0 {
            return Self {
                edges: Vec::new(),
                counts: Vec::new(),
                mean_pct,
            };
        }

        let mut lo = pct.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = pct.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for v in &pct {
            let idx = (((v - lo) / (hi - lo)) * bins as f64) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Self {
            edges,
            counts,
            mean_pct,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
