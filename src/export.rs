//! File output for generated paths and their metrics
//!
//! Series go to CSV (one row per day), the run summary goes to JSON.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::config::SimulationParams;
use crate::metrics::{MetricsReport, ReturnHistogram};
use crate::simulation::SimulatedPath;
use crate::sweep::SweepSummary;

/// One CSV row per simulated day
#[derive(Debug, Serialize)]
struct SeriesRow {
    date: NaiveDate,
    #[serde(rename = "return")]
    daily_return: f64,
    equity: f64,
    drawdown_pct: f64,
    /// Empty until the rolling window fills
    rolling_sharpe: Option<f64>,
}

/// Everything a report consumer needs besides the daily series
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub params: SimulationParams,
    pub final_equity: f64,
    pub report: MetricsReport,
    pub histogram: ReturnHistogram,
}

/// Write `date,return,equity,drawdown_pct,rolling_sharpe` rows.
///
/// `drawdown` and `rolling_sharpe` must have one value per simulated day.
pub fn write_series_csv(
    path: &Path,
    sim: &SimulatedPath,
    drawdown: &[f64],
    rolling_sharpe: &[f64],
) -> Result<()> {
    if drawdown.len() != sim.len() || rolling_sharpe.len() != sim.len() {
        bail!(
            "Series length mismatch: {} days, {} drawdown values, {} rolling Sharpe values",
            sim.len(),
            drawdown.len(),
            rolling_sharpe.len()
        );
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;

    for (i, date) in sim.dates().into_iter().enumerate() {
        writer.serialize(SeriesRow {
            date,
            daily_return: sim.returns()[i],
            equity: sim.equity()[i],
            drawdown_pct: drawdown[i],
            rolling_sharpe: Some(rolling_sharpe[i]).filter(|v| v.is_finite()),
        })?;
    }
    writer.flush()?;

    info!("Wrote {} days to {:?}", sim.len(), path);
    Ok(())
}

/// Write the run summary as pretty JSON. Non-finite metrics become `null`.
pub fn write_report_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;

    info!("Wrote report to {:?}", path);
    Ok(())
}

/// Write a seed sweep summary as pretty JSON
pub fn write_sweep_json(path: &Path, summary: &SweepSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;

    info!("Wrote sweep summary ({} seeds) to {:?}", summary.rows.len(), path);
    Ok(())
}
