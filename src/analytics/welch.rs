//! Welch's unequal-variance t-test.
//!
//! Degenerate inputs never raise: a zero standard error gives `t = 0`, a
//! zero Welch–Satterthwaite denominator gives `df = +inf`, and NaN flows
//! through to the p-value.

use serde::{Deserialize, Serialize};

use super::student_t;

/// Sample mean and sample variance of a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Arithmetic mean (0 for an empty group).
    pub mean: f64,
    /// Sample variance with `n - 1` in the denominator (0 when `n <= 1`).
    pub variance: f64,
    /// Number of observations.
    pub n: usize,
}

impl Distribution {
    /// Squared standard error of the mean, `variance / n`.
    fn standard_error_squared(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.variance / self.n as f64
        }
    }
}

/// Computes the mean and sample variance of `values`.
///
/// # Example
///
/// ```
/// use payroll_engine::analytics::calculate_distribution;
///
/// let d = calculate_distribution(&[2.0, 4.0, 6.0, 8.0]);
/// assert_eq!(d.mean, 5.0);
/// assert!((d.variance - 20.0 / 3.0).abs() < 1e-12);
/// assert_eq!(d.n, 4);
/// ```
pub fn calculate_distribution(values: &[f64]) -> Distribution {
    let n = values.len();
    if n == 0 {
        return Distribution {
            mean: 0.0,
            variance: 0.0,
            n,
        };
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = if n == 1 {
        0.0
    } else {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    };

    Distribution { mean, variance, n }
}

/// Result of Welch's two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WelchTTest {
    /// `(mean_a - mean_b) / sqrt(var_a/n_a + var_b/n_b)`.
    pub t_statistic: f64,
    /// Welch–Satterthwaite degrees of freedom.
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value in `[0, 1]`, or NaN.
    pub p_value: f64,
}

/// Runs Welch's t-test of `a` against `b`.
///
/// A group with `n <= 1` contributes 0 to the Welch–Satterthwaite
/// denominator rather than the undefined `s^4 / 0`, so the degrees of
/// freedom come from the other group alone. If neither group contributes,
/// `df` is `+inf`.
///
/// # Example
///
/// ```
/// use payroll_engine::analytics::{calculate_distribution, welch_t_test};
///
/// let low = calculate_distribution(&[1.0, 2.0, 3.0]);
/// let high = calculate_distribution(&[4.0, 5.0, 6.0]);
/// let test = welch_t_test(&high, &low);
/// assert!(test.t_statistic > 0.0);
/// assert!((test.degrees_of_freedom - 4.0).abs() < 1e-12);
/// assert!(test.p_value < 0.05);
/// ```
pub fn welch_t_test(a: &Distribution, b: &Distribution) -> WelchTTest {
    let s1 = a.standard_error_squared();
    let s2 = b.standard_error_squared();

    let standard_error = (s1 + s2).sqrt();
    let t_statistic = if standard_error == 0.0 {
        0.0
    } else {
        (a.mean - b.mean) / standard_error
    };

    let df_denominator = satterthwaite_term(s1, a.n) + satterthwaite_term(s2, b.n);
    let degrees_of_freedom = if df_denominator == 0.0 {
        f64::INFINITY
    } else {
        (s1 + s2).powi(2) / df_denominator
    };

    let p_value = (2.0 * (1.0 - student_t::cdf(t_statistic.abs(), degrees_of_freedom)))
        .clamp(0.0, 1.0);

    WelchTTest {
        t_statistic,
        degrees_of_freedom,
        p_value,
    }
}

// A group of one has zero variance and contributes nothing.
fn satterthwaite_term(s: f64, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        s * s / (n - 1) as f64
    }
}
