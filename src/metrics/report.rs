//! Scalar performance statistics for one return series.
//!
//! Degenerate denominators never error: zero volatility, zero losses and zero
//! drawdown come back as NaN or infinity so callers can show "N/A".

use serde::Serialize;

use super::drawdown::max_drawdown;
use super::stats::{mean, population_std};
use crate::config::TRADING_DAYS_PER_YEAR;

/// Fixed set of performance metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Percent change from first to last equity value
    pub total_return: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    /// Deepest drawdown in percent (<= 0)
    pub max_drawdown: f64,
    /// Percent of days with a strictly positive return
    pub win_rate: f64,
    pub profit_factor: f64,
    pub calmar_ratio: f64,
}

impl MetricsReport {
    /// Compute every metric from aligned return, equity and drawdown series
    pub fn compute(returns: &[f64], equity: &[f64], drawdown: &[f64]) -> Self {
        let total_return = total_return(equity);
        let max_dd = max_drawdown(drawdown);

        Self {
            total_return,
            sharpe_ratio: sharpe_ratio(returns),
            sortino_ratio: sortino_ratio(returns),
            max_drawdown: max_dd,
            win_rate: win_rate(returns),
            profit_factor: profit_factor(returns),
            calmar_ratio: calmar_ratio(total_return, max_dd),
        }
    }

    /// Metric names and raw values, in display order
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("Total Return", self.total_return),
            ("Sharpe Ratio", self.sharpe_ratio),
            ("Sortino Ratio", self.sortino_ratio),
            ("Max Drawdown", self.max_drawdown),
            ("Win Rate", self.win_rate),
            ("Profit Factor", self.profit_factor),
            ("Calmar Ratio", self.calmar_ratio),
        ]
    }

    /// Metric names and display strings, in display order
    pub fn formatted(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Return", format_value(self.total_return, 2, "%")),
            ("Sharpe Ratio", format_value(self.sharpe_ratio, 2, "")),
            ("Sortino Ratio", format_value(self.sortino_ratio, 2, "")),
            ("Max Drawdown", format_value(self.max_drawdown, 2, "%")),
            ("Win Rate", format_value(self.win_rate, 1, "%")),
            ("Profit Factor", format_value(self.profit_factor, 2, "")),
            ("Calmar Ratio", format_value(self.calmar_ratio, 2, "")),
        ]
    }
}

fn format_value(value: f64, decimals: usize, suffix: &str) -> String {
    if value.is_nan() {
        "N/A".to_string()
    } else if value.is_infinite() {
        let label = if value > 0.0 { "inf" } else { "-inf" };
        label.to_string()
    } else {
        format!("{:.*}{}", decimals, value, suffix)
    }
}

/// `(last / first - 1) * 100`, NaN for an empty curve
pub fn total_return(equity: &[f64]) -> f64 {
    match (equity.first(), equity.last()) {
        (Some(first), Some(last)) => (last / first - 1.0) * 100.0,
        _ => f64::NAN,
    }
}

/// Annualized mean / population std. Zero std passes through as NaN or infinity.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    mean(returns) / population_std(returns) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Like Sharpe, but std over losing days only. NaN if there are none.
pub fn sortino_ratio(returns: &[f64]) -> f64 {
    let downside: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
    if downside.is_empty() {
        return f64::NAN;
    }
    mean(returns) / population_std(&downside) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Percent of days with return > 0
pub fn win_rate(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }
    let wins = returns.iter().filter(|&&r| r > 0.0).count();
    wins as f64 / returns.len() as f64 * 100.0
}

/// Sum of gains / |sum of losses|. Infinity when nothing lost.
pub fn profit_factor(returns: &[f64]) -> f64 {
    let gains: f64 = returns.iter().filter(|&&r| r > 0.0).sum();
    let losses: f64 = returns.iter().filter(|&&r| r < 0.0).sum::<f64>().abs();
    if losses > 0.0 {
        gains / losses
    } else {
        f64::INFINITY
    }
}

/// Total return over |max drawdown|, both in percent. Zero drawdown passes through.
pub fn calmar_ratio(total_return: f64, max_drawdown: f64) -> f64 {
    (total_return / 100.0) / (max_drawdown / 100.0).abs()
}
