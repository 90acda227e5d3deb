use crate::error::{invalid, Result};
use statrs::function::factorial::ln_binomial;

/// Check that `x` is a probability in [0, 1]
pub fn validate_bias(x: f64) -> Result<()> {
    if x.is_nan() || !(0.0..=1.0).contains(&x) {
        return invalid(format!("bias must lie in [0, 1], got {}", x));
    }
    Ok(())
}

/// Check that the outcome count `h` is within 0..=n
pub fn validate_outcome(h: u64, n: u64) -> Result<()> {
    if h > n {
        return invalid(format!("outcome h={} exceeds number of trials n={}", h, n));
    }
    Ok(())
}

// k * ln(p), with 0 * ln(0) taken as 0
fn xlogy(k: u64, p: f64) -> f64 {
    if k == 0 { 0.0 } else { k as f64 * p.ln() }
}

/// Log of the probability of exactly `h` successes in `n` trials with success probability `x`.
///
/// Computed as ln C(n, h) + h ln x + (n - h) ln(1 - x), so it stays finite for large `n`
/// where the coefficient itself would overflow.
pub fn ln_binomial_pmf(h: u64, n: u64, x: f64) -> Result<f64> {
    validate_bias(x)?;
    validate_outcome(h, n)?;
    Ok(ln_binomial(n, h) + xlogy(h, x) + xlogy(n - h, 1.0 - x))
}

/// Probability of exactly `h` successes in `n` Bernoulli(`x`) trials
pub fn binomial_pmf(h: u64, n: u64, x: f64) -> Result<f64> {
    Ok(ln_binomial_pmf(h, n, x)?.exp())
}
