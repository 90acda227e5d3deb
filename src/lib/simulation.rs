//! Monte Carlo estimate of power.
//!
//! Repeats the coin-flipping experiment many times with a known bias and counts how
//! often the fair-coin test rejects. The fraction should match [`crate::power::power`] up to
//! sampling error.

use crate::binomial::validate_bias;
use crate::error::{invalid, Result};
use crate::power::RejectionRegion;
use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Seeded generator, deterministic for a given seed on the same platform
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Number of successes in `n` independent Bernoulli(`x`) draws
pub fn sample_binomial<R: Rng>(n: u64, x: f64, rng: &mut R) -> Result<u64> {
    validate_bias(x)?;
    Ok((0..n).filter(|_| rng.gen_bool(x)).count() as u64)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulationResult {
    pub bias: f64,
    pub n_trials: u64,
    pub replicates: u64,
    pub n_significant: u64,
    pub estimated_power: f64,
    pub standard_error: f64,
    pub analytic_power: f64,
}

impl SimulationResult {
    /// Whether the simulated power is within `tolerance` of the exact power
    pub fn agrees(&self, tolerance: f64) -> bool {
        (self.estimated_power - self.analytic_power).abs() <= tolerance
    }
}

/// Simulate `replicates` experiments of `n` flips with bias `x` and count significant ones
pub fn simulate_power<R: Rng>(
    x: f64,
    n: u64,
    replicates: u64,
    alpha: f64,
    rng: &mut R,
) -> Result<SimulationResult> {
    validate_bias(x)?;
    if replicates == 0 {
        return invalid("number of replicates must be positive");
    }
    let region = RejectionRegion::new(n, alpha)?;
    let analytic_power = region.power(x)?;

    let mut n_significant = 0;
    for _ in 0..replicates {
        let heads = sample_binomial(n, x, rng)?;
        if region.contains(heads) {
            n_significant += 1;
        }
    }

    let estimated_power = n_significant as f64 / replicates as f64;
    let standard_error = (estimated_power * (1.0 - estimated_power) / replicates as f64).sqrt();
    debug!(
        "Simulated {} replicates of n={} x={}: {} significant",
        replicates, n, x, n_significant
    );
    Ok(SimulationResult {
        bias: x,
        n_trials: n,
        replicates,
        n_significant,
        estimated_power,
        standard_error,
        analytic_power,
    })
}
