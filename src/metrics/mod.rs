//! Metrics engine
//!
//! Pure functions over a finished path: drawdown series, the fixed
//! performance report, plus rolling Sharpe and a returns histogram.

pub mod drawdown;
pub mod report;
pub mod rolling;
pub mod stats;

pub use drawdown::{drawdown_series, max_drawdown, running_max};
pub use report::MetricsReport;
pub use rolling::{rolling_sharpe, ReturnHistogram, DEFAULT_HISTOGRAM_BINS, DEFAULT_ROLLING_WINDOW};

use crate::simulation::SimulatedPath;

/// Drawdown series and report for one path
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Percent below running peak, aligned with the path
    pub drawdown: Vec<f64>,
    pub report: MetricsReport,
}

/// Run the metrics engine over a generated path
pub fn analyze(path: &SimulatedPath) -> Analysis {
    let drawdown = drawdown_series(path.equity());
    let report = MetricsReport::compute(path.returns(), path.equity(), &drawdown);
    Analysis { drawdown, report }
}
