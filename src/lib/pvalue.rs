use crate::binomial::{binomial_pmf, validate_outcome};
use crate::error::{invalid, Result};

/// Success probability under the null hypothesis of a fair coin
pub const NULL_BIAS: f64 = 0.5;

/// Two-tailed p-value of observing `h` heads in `n` flips of a fair coin.
///
/// The null distribution is symmetric around n / 2, so the outcome is folded to
/// `min(h, n - h)` and the mass of both tails at least that extreme is summed.
/// When the folded outcome is the exact middle (even `n`), both tails contain it
/// and one copy is removed.
///
/// This test is specific to the fair-coin null; it is not valid for other null biases.
pub fn two_tailed_pvalue(h: u64, n: u64) -> Result<f64> {
    if n == 0 {
        return invalid("p-value is undefined for zero trials");
    }
    validate_outcome(h, n)?;

    let folded = h.min(n - h);
    let mut left = 0.0;
    for i in 0..=folded {
        left += binomial_pmf(i, n, NULL_BIAS)?;
    }
    let mut right = 0.0;
    for i in (n - folded)..=n {
        right += binomial_pmf(i, n, NULL_BIAS)?;
    }
    if 2 * folded == n {
        left -= binomial_pmf(folded, n, NULL_BIAS)?;
    }
    Ok((left + right).min(1.0))
}

/// P-values for every outcome 0..=n
pub fn pvalue_table(n: u64) -> Result<Vec<f64>> {
    (0..=n).map(|h| two_tailed_pvalue(h, n)).collect()
}
