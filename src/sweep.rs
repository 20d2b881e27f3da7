//! Seed Sweep Module
//!
//! Generates and scores one path per seed in parallel using Rayon.
//! Every path owns its RNG, so results don't depend on thread scheduling.

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::SimulationParams;
use crate::metrics::{analyze, stats::mean, MetricsReport};
use crate::simulation::generate_path;

/// Metrics for a single seed
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub seed: u64,
    pub final_equity: f64,
    pub report: MetricsReport,
}

/// Per-seed rows plus aggregates across the sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub rows: Vec<SweepRow>,
    /// Means skip non-finite values
    pub mean_total_return: f64,
    pub mean_sharpe: f64,
    pub mean_max_drawdown: f64,
    /// Share of seeds ending above their first equity value (0..=1)
    pub profitable_fraction: f64,
}

/// Run `base` once per seed, all other params held fixed
pub fn run_seed_sweep(base: &SimulationParams, seeds: &[u64]) -> Result<SweepSummary> {
    base.validate()?;
    info!("Sweeping {} seeds over {} days", seeds.len(), base.horizon_days);

    let mut rows = seeds
        .par_iter()
        .map(|&seed| -> Result<SweepRow> {
            let path = generate_path(&base.with_seed(seed))?;
            let analysis = analyze(&path);
            Ok(SweepRow {
                seed,
                final_equity: path.final_equity(),
                report: analysis.report,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    rows.sort_by_key(|row| row.seed);

    let summary = SweepSummary {
        mean_total_return: finite_mean(rows.iter().map(|r| r.report.total_return)),
        mean_sharpe: finite_mean(rows.iter().map(|r| r.report.sharpe_ratio)),
        mean_max_drawdown: finite_mean(rows.iter().map(|r| r.report.max_drawdown)),
        profitable_fraction: if rows.is_empty() {
            f64::NAN
        } else {
            rows.iter().filter(|r| r.report.total_return > 0.0).count() as f64 / rows.len() as f64
        },
        rows,
    };

    Ok(summary)
}

fn finite_mean(values: impl Iterator<Item = f64>) -> f64 {
    let finite: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    mean(&finite)
}
