//! Simulation parameters
//!
//! Defaults describe one trading year of a $100K account targeting
//! 15% annual return at 20% annual volatility.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Trading days per year used for drift/vol scaling and annualization
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Input parameters for one synthetic equity path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Number of trading days to simulate
    pub horizon_days: usize,

    /// Starting account balance in dollars
    pub initial_capital: f64,

    /// Target annual return (0.15 = 15%)
    pub annual_return: f64,

    /// Target annual volatility (0.20 = 20%)
    pub annual_volatility: f64,

    /// RNG seed, same seed gives the same path
    pub seed: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            horizon_days: 252,
            initial_capital: 100_000.0,
            annual_return: 0.15,
            annual_volatility: 0.20,
            seed: 42,
        }
    }
}

impl SimulationParams {
    /// Load params from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let params: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(params)
    }

    /// Same params with a different seed
    pub fn with_seed(&self, seed: u64) -> Self {
        Self { seed, ..self.clone() }
    }

    /// Per-day target drift (mu)
    pub fn daily_drift(&self) -> f64 {
        self.annual_return / TRADING_DAYS_PER_YEAR
    }

    /// Per-day target volatility (sigma)
    pub fn daily_volatility(&self) -> f64 {
        self.annual_volatility / TRADING_DAYS_PER_YEAR.sqrt()
    }

    /// Reject params the generator cannot turn into a path
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            bail!("horizon_days must be at least 1");
        }
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            bail!("initial_capital must be positive, got {}", self.initial_capital);
        }
        if !self.annual_return.is_finite() {
            bail!("annual_return must be finite, got {}", self.annual_return);
        }
        if !self.annual_volatility.is_finite() || self.annual_volatility < 0.0 {
            bail!(
                "annual_volatility must be non-negative, got {}",
                self.annual_volatility
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SimulationParams::default();
        assert_eq!(params.horizon_days, 252);
        assert_eq!(params.initial_capital, 100_000.0);
        assert_eq!(params.seed, 42);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_daily_scaling() {
        let params = SimulationParams::default();
        assert!((params.daily_drift() - 0.15 / 252.0).abs() < 1e-15);
        assert!((params.daily_volatility() - 0.20 / 252f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let base = SimulationParams::default();

        let zero_days = SimulationParams { horizon_days: 0, ..base.clone() };
        assert!(zero_days.validate().is_err());

        let broke = SimulationParams { initial_capital: 0.0, ..base.clone() };
        assert!(broke.validate().is_err());

        let negative_vol = SimulationParams { annual_volatility: -0.1, ..base.clone() };
        assert!(negative_vol.validate().is_err());

        let nan_return = SimulationParams { annual_return: f64::NAN, ..base.clone() };
        assert!(nan_return.validate().is_err());

        // Zero vol is a valid degenerate case
        let flat = SimulationParams { annual_volatility: 0.0, ..base };
        assert!(flat.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: SimulationParams =
            serde_json::from_str(r#"{"seed": 7, "horizon_days": 30}"#).unwrap();
        assert_eq!(params.seed, 7);
        assert_eq!(params.horizon_days, 30);
        assert_eq!(params.initial_capital, 100_000.0);
        assert_eq!(params.annual_return, 0.15);
    }

    #[test]
    fn test_with_seed() {
        let params = SimulationParams::default().with_seed(99);
        assert_eq!(params.seed, 99);
        assert_eq!(params.horizon_days, 252);
    }
}
