use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use equity_curve_sim::export::{
    write_report_json, write_series_csv, write_sweep_json, RunSummary,
};
use equity_curve_sim::metrics::{
    analyze, rolling_sharpe, ReturnHistogram, DEFAULT_HISTOGRAM_BINS, DEFAULT_ROLLING_WINDOW,
};
use equity_curve_sim::simulation::generate_path;
use equity_curve_sim::sweep::run_seed_sweep;
use equity_curve_sim::SimulationParams;

#[derive(Parser, Debug)]
#[command(name = "equity-sim")]
#[command(about = "Synthetic equity curve generator & performance metrics")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Print verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Simulation parameters shared by every subcommand
#[derive(ClapArgs, Debug)]
struct ParamArgs {
    /// JSON file with simulation params (flags override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trading days to simulate
    #[arg(long, env = "SIM_HORIZON_DAYS")]
    horizon_days: Option<usize>,

    /// Starting capital in dollars
    #[arg(long, env = "SIM_INITIAL_CAPITAL")]
    initial_capital: Option<f64>,

    /// Target annual return (0.15 = 15%)
    #[arg(long, env = "SIM_ANNUAL_RETURN", allow_hyphen_values = true)]
    annual_return: Option<f64>,

    /// Target annual volatility (0.20 = 20%)
    #[arg(long, env = "SIM_ANNUAL_VOLATILITY")]
    annual_volatility: Option<f64>,

    /// RNG seed
    #[arg(long, env = "SIM_SEED")]
    seed: Option<u64>,
}

impl ParamArgs {
    fn resolve(&self) -> Result<SimulationParams> {
        let mut params = match &self.config {
            Some(path) => SimulationParams::from_json_file(path)?,
            None => SimulationParams::default(),
        };

        if let Some(v) = self.horizon_days {
            params.horizon_days = v;
        }
        if let Some(v) = self.initial_capital {
            params.initial_capital = v;
        }
        if let Some(v) = self.annual_return {
            params.annual_return = v;
        }
        if let Some(v) = self.annual_volatility {
            params.annual_volatility = v;
        }
        if let Some(v) = self.seed {
            params.seed = v;
        }

        params.validate()?;
        Ok(params)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one equity path and compute its metrics
    Run {
        #[command(flatten)]
        params: ParamArgs,

        /// Write the daily series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the metrics summary to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Trailing window for rolling Sharpe (days)
        #[arg(long, default_value_t = DEFAULT_ROLLING_WINDOW)]
        rolling_window: usize,

        /// Returns histogram bucket count
        #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
        bins: usize,
    },

    /// Run the same params across many seeds
    Sweep {
        #[command(flatten)]
        params: ParamArgs,

        /// Number of seeds to run
        #[arg(long, default_value = "100")]
        seeds: u64,

        /// First seed (seeds are consecutive)
        #[arg(long, default_value = "0")]
        first_seed: u64,

        /// Write the sweep summary to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Commands::Run { params, csv, json, rolling_window, bins } => {
            run_single(params.resolve()?, csv, json, rolling_window, bins)?;
        }
        Commands::Sweep { params, seeds, first_seed, json } => {
            run_sweep(params.resolve()?, seeds, first_seed, json)?;
        }
    }

    Ok(())
}

fn run_single(
    params: SimulationParams,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    rolling_window: usize,
    bins: usize,
) -> Result<()> {
    info!("=== RUN ===");
    info!(
        "{} days, ${:.0} start, {:.1}% return / {:.1}% vol target, seed {}",
        params.horizon_days,
        params.initial_capital,
        params.annual_return * 100.0,
        params.annual_volatility * 100.0,
        params.seed
    );

    let path = generate_path(&params)?;
    let analysis = analyze(&path);
    let rolling = rolling_sharpe(path.returns(), rolling_window);
    let histogram = ReturnHistogram::build(path.returns(), bins);

    for (name, value) in analysis.report.entries() {
        if !value.is_finite() {
            warn!("{} is not finite ({})", name, value);
        }
    }

    print_report(&params, path.final_equity(), &analysis.report.formatted());

    if let Some(csv_path) = csv {
        write_series_csv(&csv_path, &path, &analysis.drawdown, &rolling)?;
    }

    if let Some(json_path) = json {
        let summary = RunSummary {
            params,
            final_equity: path.final_equity(),
            report: analysis.report,
            histogram,
        };
        write_report_json(&json_path, &summary)?;
    }

    info!("Run complete!");
    Ok(())
}

fn run_sweep(
    params: SimulationParams,
    seeds: u64,
    first_seed: u64,
    json: Option<PathBuf>,
) -> Result<()> {
    info!("=== SWEEP ===");

    let seed_list: Vec<u64> = (first_seed..first_seed.saturating_add(seeds)).collect();
    let summary = run_seed_sweep(&params, &seed_list)?;

    println!("\n{}", "=".repeat(60));
    println!("SEED SWEEP ({} seeds, {} days each)", summary.rows.len(), params.horizon_days);
    println!("{}", "=".repeat(60));
    println!("  Mean total return:  {:.2}%", summary.mean_total_return);
    println!("  Mean Sharpe:        {:.2}", summary.mean_sharpe);
    println!("  Mean max drawdown:  {:.2}%", summary.mean_max_drawdown);
    println!("  Profitable seeds:   {:.1}%", summary.profitable_fraction * 100.0);

    if let Some(worst) = summary
        .rows
        .iter()
        .min_by(|a, b| a.report.max_drawdown.total_cmp(&b.report.max_drawdown))
    {
        println!(
            "  Worst drawdown:     {:.2}% (seed {})",
            worst.report.max_drawdown, worst.seed
        );
    }

    if let Some(json_path) = json {
        write_sweep_json(&json_path, &summary)?;
    }

    info!("Sweep complete!");
    Ok(())
}

fn print_report(params: &SimulationParams, final_equity: f64, rows: &[(&'static str, String)]) {
    println!("\n{}", "=".repeat(40));
    println!("PERFORMANCE METRICS");
    println!("{}", "=".repeat(40));
    println!("  Initial capital: ${:.2}", params.initial_capital);
    println!("  Final equity:    ${:.2}", final_equity);
    println!("{}", "-".repeat(40));
    for (name, value) in rows {
        println!("  {:20} {:>12}", name, value);
    }
    println!("{}", "=".repeat(40));
}
