//! Synthetic path generation
//!
//! - Autocorrelated daily returns (drift + momentum + mean reversion + noise)
//! - Random shock days
//! - Equity curve compounded from the returns

mod generator;
mod path;

pub use generator::{generate_path, shock_count, MEAN_REVERSION, MOMENTUM, SHOCK_DAYS, SHOCK_MULTIPLIER};
pub use path::{default_start_date, SimulatedPath};
