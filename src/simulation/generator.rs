use anyhow::{anyhow, Result};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use super::path::{default_start_date, SimulatedPath};
use crate::config::SimulationParams;

/// Share of yesterday's return carried into today
pub const MOMENTUM: f64 = 0.1;

/// Pull of yesterday's excess return back toward the drift
pub const MEAN_REVERSION: f64 = 0.05;

/// Shock days per path (clamped to the horizon)
pub const SHOCK_DAYS: usize = 5;

/// Multiplier applied to a shock day's return
pub const SHOCK_MULTIPLIER: f64 = 3.0;

/// Number of shock days for a horizon. Short horizons shock every day.
pub fn shock_count(horizon_days: usize) -> usize {
    SHOCK_DAYS.min(horizon_days)
}

/// Generate a synthetic equity path.
///
/// Each call owns a ChaCha8 RNG seeded from `params.seed`, so identical params
/// give identical paths on every platform and parallel calls never share state.
pub fn generate_path(params: &SimulationParams) -> Result<SimulatedPath> {
    params.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let drift = params.daily_drift();
    let vol = params.daily_volatility();

    debug!(
        "Generating {} days: drift={:.6}/day vol={:.6}/day seed={}",
        params.horizon_days, drift, vol, params.seed
    );

    let mut returns = simulate_returns(&mut rng, params.horizon_days, drift, vol)?;
    let shocked = inject_shocks(&mut rng, &mut returns);

    debug!("Shock days: {:?}", shocked);

    Ok(SimulatedPath::from_returns(
        params.initial_capital,
        default_start_date(),
        returns,
    ))
}

/// Autocorrelated daily returns: drift + momentum + mean reversion + noise
fn simulate_returns<R: Rng + ?Sized>(
    rng: &mut R,
    horizon_days: usize,
    drift: f64,
    vol: f64,
) -> Result<Vec<f64>> {
    let mut returns = Vec::with_capacity(horizon_days);
    if horizon_days == 0 {
        return Ok(returns);
    }

    let first_day = Normal::new(drift, vol)
        .map_err(|e| anyhow!("Invalid return distribution (vol={}): {}", vol, e))?;
    let noise = Normal::new(0.0, vol)
        .map_err(|e| anyhow!("Invalid noise distribution (vol={}): {}", vol, e))?;

    let mut prev = first_day.sample(rng);
    returns.push(prev);

    for _ in 1..horizon_days {
        let momentum = MOMENTUM * prev;
        let mean_reversion = -MEAN_REVERSION * (prev - drift);
        let today = drift + momentum + mean_reversion + noise.sample(rng);
        returns.push(today);
        prev = today;
    }

    Ok(returns)
}

/// Amplify a handful of distinct random days. Returns the shocked indices, sorted.
fn inject_shocks<R: Rng + ?Sized>(rng: &mut R, returns: &mut [f64]) -> Vec<usize> {
    let count = shock_count(returns.len());
    let mut days: Vec<usize> = index::sample(rng, returns.len(), count).into_vec();
    for &day in &days {
        returns[day] *= SHOCK_MULTIPLIER;
    }
    days.sort_unstable();
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_params(horizon_days: usize, annual_return: f64) -> SimulationParams {
        SimulationParams {
            horizon_days,
            initial_capital: 1000.0,
            annual_return,
            annual_volatility: 0.0,
            seed: 1,
        }
    }

    /// Returns the recurrence would give with zero noise and no shocks
    fn noiseless(horizon_days: usize, drift: f64) -> Vec<f64> {
        let mut out = vec![drift];
        for i in 1..horizon_days {
            let prev = out[i - 1];
            out.push(drift + MOMENTUM * prev - MEAN_REVERSION * (prev - drift));
        }
        out
    }

    #[test]
    fn test_same_seed_same_path() {
        let params = SimulationParams::default();
        let a = generate_path(&params).unwrap();
        let b = generate_path(&params).unwrap();
        assert_eq!(a.returns(), b.returns());
        assert_eq!(a.equity(), b.equity());
    }

    #[test]
    fn test_default_seed_golden_values() {
        // Pinned output for seed 42; a change here means the RNG stream moved
        let path = generate_path(&SimulationParams::default()).unwrap();
        let expected = [
            0.00661723565729282,
            0.017763571621310086,
            -0.001143491912859115,
            0.006569232538589299,
        ];
        for (actual, want) in path.returns().iter().zip(expected) {
            assert!((actual - want).abs() < 1e-15, "{} vs {}", actual, want);
        }

        // Day 40 is a shock day for this seed
        assert!((path.returns()[40] - 0.032852234375195064).abs() < 1e-15);
        assert!((path.final_equity() - 102194.16318270567).abs() < 1e-6);
    }

    #[test]
    fn test_different_seed_different_path() {
        let a = generate_path(&SimulationParams::default()).unwrap();
        let b = generate_path(&SimulationParams::default().with_seed(43)).unwrap();
        assert_ne!(a.returns(), b.returns());
    }

    #[test]
    fn test_lengths_match_horizon() {
        let params = SimulationParams { horizon_days: 17, ..Default::default() };
        let path = generate_path(&params).unwrap();
        assert_eq!(path.returns().len(), 17);
        assert_eq!(path.equity().len(), 17);
        assert_eq!(path.dates().len(), 17);
    }

    #[test]
    fn test_equity_is_cumulative_product() {
        let params = SimulationParams::default();
        let path = generate_path(&params).unwrap();

        let mut product = params.initial_capital;
        for (r, e) in path.returns().iter().zip(path.equity()) {
            product *= 1.0 + r;
            assert!((product - e).abs() <= 1e-9 * product.abs());
        }
    }

    #[test]
    fn test_zero_vol_zero_return_is_flat() {
        let params = SimulationParams {
            horizon_days: 10,
            initial_capital: 1000.0,
            annual_return: 0.0,
            annual_volatility: 0.0,
            seed: 1,
        };
        let path = generate_path(&params).unwrap();
        assert!(path.returns().iter().all(|&r| r == 0.0));
        assert_eq!(path.equity(), &[1000.0; 10]);
    }

    #[test]
    fn test_zero_vol_shocks_exactly_five_days() {
        let params = flat_params(10, 0.252);
        let path = generate_path(&params).unwrap();
        let expected = noiseless(10, params.daily_drift());

        let mut shocked = 0;
        for (actual, base) in path.returns().iter().zip(&expected) {
            if (actual - base * SHOCK_MULTIPLIER).abs() < 1e-12 {
                shocked += 1;
            } else {
                assert!((actual - base).abs() < 1e-12);
            }
        }
        assert_eq!(shocked, 5);
    }

    #[test]
    fn test_short_horizon_shocks_every_day() {
        // Fewer days than shock events: every day gets shocked once
        assert_eq!(shock_count(3), 3);

        let params = flat_params(3, 0.252);
        let path = generate_path(&params).unwrap();
        let drift = params.daily_drift();
        let expected = [3.0 * drift, 3.0 * 1.1 * drift, 3.0 * 1.105 * drift];

        for (actual, want) in path.returns().iter().zip(expected) {
            assert!((actual - want).abs() < 1e-12, "{} vs {}", actual, want);
        }
    }

    #[test]
    fn test_single_day_horizon() {
        let params = SimulationParams { horizon_days: 1, ..Default::default() };
        let path = generate_path(&params).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(shock_count(1), 1);
    }

    #[test]
    fn test_shock_indices_distinct_and_sorted() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut returns = vec![1.0; 252];
        let days = inject_shocks(&mut rng, &mut returns);

        assert_eq!(days.len(), SHOCK_DAYS);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(returns.iter().filter(|&&r| r == SHOCK_MULTIPLIER).count(), SHOCK_DAYS);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = SimulationParams { horizon_days: 0, ..Default::default() };
        assert!(generate_path(&params).is_err());
    }
}
