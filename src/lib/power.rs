use crate::binomial::{binomial_pmf, validate_bias};
use crate::error::{invalid, Result};
use crate::pvalue::pvalue_table;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

/// Conventional significance level
pub const DEFAULT_ALPHA: f64 = 0.05;

pub fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
        return invalid(format!("significance level must lie in (0, 1), got {}", alpha));
    }
    Ok(())
}

/// Outcomes of an `n` flip experiment that a fair-coin test rejects at level `alpha`
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionRegion {
    pub n_trials: u64,
    pub alpha: f64,
    significant: Vec<bool>,
}

impl RejectionRegion {
    pub fn new(n_trials: u64, alpha: f64) -> Result<Self> {
        validate_alpha(alpha)?;
        let significant = pvalue_table(n_trials)?
            .into_iter()
            .map(|p| p < alpha)
            .collect();
        Ok(Self {
            n_trials,
            alpha,
            significant,
        })
    }

    pub fn contains(&self, h: u64) -> bool {
        self.significant.get(h as usize).copied().unwrap_or(false)
    }

    pub fn outcomes(&self) -> Vec<u64> {
        (0..=self.n_trials).filter(|&h| self.contains(h)).collect()
    }

    /// Largest significant outcome in the lower tail, if any outcome is significant
    pub fn critical_count(&self) -> Option<u64> {
        (0..=self.n_trials / 2).rev().find(|&h| self.contains(h))
    }

    /// Probability of landing in the region when the true bias is `x`
    pub fn power(&self, x: f64) -> Result<f64> {
        validate_bias(x)?;
        let mut total = 0.0;
        for h in self.outcomes() {
            total += binomial_pmf(h, self.n_trials, x)?;
        }
        Ok(total)
    }
}

/// Probability that `n` flips of a coin with bias `x` give a p-value below `alpha`.
///
/// Significance is decided under the fair-coin null, while the outcome probabilities
/// follow the true bias. Power is not monotone in `n`: the discrete outcome space
/// makes it jump whenever an outcome crosses the threshold.
pub fn power(x: f64, n: u64, alpha: f64) -> Result<f64> {
    RejectionRegion::new(n, alpha)?.power(x)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PowerPoint {
    pub bias: f64,
    pub n_trials: u64,
    pub power: f64,
}

/// Power for every combination of bias and trial count, ordered by bias then trial count
pub fn power_curve(biases: &[f64], trial_counts: &[u64], alpha: f64) -> Result<Vec<PowerPoint>> {
    validate_alpha(alpha)?;
    for &x in biases {
        validate_bias(x)?;
    }
    debug!(
        "Computing power for {} biases over {} trial counts",
        biases.len(),
        trial_counts.len()
    );

    // The region only depends on n, so build it once per trial count
    let per_n: Vec<Vec<PowerPoint>> = trial_counts
        .par_iter()
        .map(|&n| {
            let region = RejectionRegion::new(n, alpha)?;
            debug!("n={}: critical count {:?}", n, region.critical_count());
            biases
                .iter()
                .map(|&bias| {
                    Ok(PowerPoint {
                        bias,
                        n_trials: n,
                        power: region.power(bias)?,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let points = (0..biases.len())
        .cartesian_product(0..trial_counts.len())
        .map(|(b, n)| per_n[n][b].clone())
        .collect();
    Ok(points)
}

/// Trial counts after which power drops, i.e. power at the next point of the same bias is lower
pub fn power_drops(points: &[PowerPoint]) -> Vec<u64> {
    points
        .iter()
        .tuple_windows()
        .filter(|(cur, next)| {
            cur.bias == next.bias && next.n_trials > cur.n_trials && next.power < cur.power
        })
        .map(|(cur, _)| cur.n_trials)
        .collect()
}

/// Smallest number of trials in 1..=max_trials whose power reaches `target`.
///
/// Because of the sawtooth in power, some larger trial counts may fall back below the target.
pub fn min_trials_for_power(
    x: f64,
    target: f64,
    alpha: f64,
    max_trials: u64,
) -> Result<Option<u64>> {
    validate_bias(x)?;
    validate_alpha(alpha)?;
    if target.is_nan() || target <= 0.0 || target > 1.0 {
        return invalid(format!("target power must lie in (0, 1], got {}", target));
    }
    for n in 1..=max_trials {
        if power(x, n, alpha)? >= target {
            debug!("Power {} reached at n={} for bias {}", target, n, x);
            return Ok(Some(n));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PowerError;

    #[test]
    fn test_known_power() {
        assert!((power(0.5, 50, DEFAULT_ALPHA).unwrap() - 0.0328).abs() < 1e-3);
        assert!((power(0.75, 50, DEFAULT_ALPHA).unwrap() - 0.9449).abs() < 1e-3);
    }

    #[test]
    fn test_rejection_region_n10() {
        let region = RejectionRegion::new(10, DEFAULT_ALPHA).unwrap();
        // p(1, 10) ~ 0.021, p(2, 10) ~ 0.109
        assert_eq!(region.outcomes(), vec![0, 1, 9, 10]);
        assert_eq!(region.critical_count(), Some(1));
        assert!(region.contains(0));
        assert!(!region.contains(5));
        assert!(!region.contains(11));
    }

    #[test]
    fn test_rejection_region_empty_for_small_n() {
        // With five flips even 0 heads has p = 0.0625
        let region = RejectionRegion::new(5, DEFAULT_ALPHA).unwrap();
        assert!(region.outcomes().is_empty());
        assert_eq!(region.critical_count(), None);
        assert_eq!(power(0.9, 5, DEFAULT_ALPHA).unwrap(), 0.0);
    }

    #[test]
    fn test_power_at_null_stays_below_alpha() {
        for n in 1..=120 {
            let p = power(0.5, n, DEFAULT_ALPHA).unwrap();
            assert!(p < DEFAULT_ALPHA, "n={} power={}", n, p);
        }
    }

    #[test]
    fn test_power_monotone_in_effect_size() {
        for n in vec![10, 25, 50, 101] {
            let mut previous = power(0.5, n, DEFAULT_ALPHA).unwrap();
            for step in 1..=50 {
                let x = 0.5 + step as f64 * 0.01;
                let up = power(x, n, DEFAULT_ALPHA).unwrap();
                let down = power(1.0 - x, n, DEFAULT_ALPHA).unwrap();
                assert!(up + 1e-12 >= previous, "n={} x={}", n, x);
                assert!((up - down).abs() < 1e-9, "n={} x={}", n, x);
                previous = up;
            }
        }
    }

    #[test]
    fn test_power_not_monotone_in_trials() {
        let trial_counts: Vec<u64> = (10..=300).collect();
        let powers: Vec<f64> = trial_counts
            .iter()
            .map(|&n| power(0.5, n, DEFAULT_ALPHA).unwrap())
            .collect();
        let strictly_increasing = powers.windows(2).all(|w| w[0] < w[1]);
        assert!(!strictly_increasing);
        // 10 -> 11 is the first drop: 0.0215 then 0.0117
        assert!(powers[1] < powers[0]);
    }

    #[test]
    fn test_power_curve_ordering() {
        let biases = vec![0.5, 0.7];
        let trials = vec![10, 11, 12];
        let curve = power_curve(&biases, &trials, DEFAULT_ALPHA).unwrap();
        assert_eq!(curve.len(), 6);
        let keys: Vec<(f64, u64)> = curve.iter().map(|p| (p.bias, p.n_trials)).collect();
        assert_eq!(
            keys,
            vec![(0.5, 10), (0.5, 11), (0.5, 12), (0.7, 10), (0.7, 11), (0.7, 12)]
        );
        for point in &curve {
            let expected = power(point.bias, point.n_trials, DEFAULT_ALPHA).unwrap();
            assert!((point.power - expected).abs() < 1e-15);
        }
    }

    #[test]
    fn test_power_drops() {
        let trials: Vec<u64> = (10..=20).collect();
        let curve = power_curve(&[0.5], &trials, DEFAULT_ALPHA).unwrap();
        let drops = power_drops(&curve);
        assert_eq!(drops, vec![10, 12, 13, 15, 17, 18]);

        // No drop is reported across a change of bias
        let two = power_curve(&[0.9, 0.5], &[40], DEFAULT_ALPHA).unwrap();
        assert!(power_drops(&two).is_empty());
    }

    #[test]
    fn test_min_trials_for_power() {
        let n = min_trials_for_power(0.75, 0.8, DEFAULT_ALPHA, 200).unwrap();
        assert_eq!(n, Some(30));
        assert!(power(0.75, 29, DEFAULT_ALPHA).unwrap() < 0.8);
        // A fair coin never reaches 80% power
        assert_eq!(min_trials_for_power(0.5, 0.8, DEFAULT_ALPHA, 100).unwrap(), None);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(power(0.5, 0, DEFAULT_ALPHA), Err(PowerError::InvalidArgument(_))));
        assert!(matches!(power(1.2, 10, DEFAULT_ALPHA), Err(PowerError::InvalidArgument(_))));
        assert!(matches!(power(f64::NAN, 10, DEFAULT_ALPHA), Err(PowerError::InvalidArgument(_))));
        assert!(matches!(power(0.5, 10, 0.0), Err(PowerError::InvalidArgument(_))));
        assert!(matches!(power(0.5, 10, 1.0), Err(PowerError::InvalidArgument(_))));
        assert!(matches!(
            min_trials_for_power(0.7, 0.0, DEFAULT_ALPHA, 10),
            Err(PowerError::InvalidArgument(_))
        ));
        assert!(power_curve(&[0.5], &[0, 10], DEFAULT_ALPHA).is_err());
    }
}
