//! Student's t distribution.
//!
//! The CDF integrates the density from 0 with composite Simpson's rule.
//! The interval count grows with `t` (`max(200, 40t)`, rounded up to even),
//! which keeps the error well below 1e-9 for the statistics this crate
//! produces.

use std::f64::consts::PI;

use super::log_gamma::ln_gamma;

const MIN_INTERVALS: usize = 200;
const INTERVALS_PER_UNIT: f64 = 40.0;
// Bounds the work for pathological |t|; reached only for t > 250_000.
const MAX_INTERVALS: usize = 10_000_000;

/// Probability density of Student's t distribution with `df` degrees of
/// freedom.
///
/// `df = +inf` gives the standard normal density.
pub fn pdf(x: f64, df: f64) -> f64 {
    if df.is_infinite() {
        return normal_pdf(x);
    }
    (log_normalizer(df) - (df + 1.0) / 2.0 * (x * x / df).ln_1p()).exp()
}

/// Cumulative distribution function of Student's t distribution.
///
/// Returns a probability in `[0, 1]`. NaN arguments and `df <= 0` yield
/// NaN. `cdf(0, df)` is exactly 0.5, and negative `t` is resolved through
/// `cdf(t) = 1 − cdf(−t)`.
///
/// # Example
///
/// ```
/// use payroll_engine::analytics::student_t;
///
/// // One degree of freedom is the Cauchy distribution.
/// assert!((student_t::cdf(1.0, 1.0) - 0.75).abs() < 1e-9);
/// assert_eq!(student_t::cdf(0.0, 7.0), 0.5);
/// ```
pub fn cdf(t: f64, df: f64) -> f64 {
    if t.is_nan() || df.is_nan() || df <= 0.0 {
        return f64::NAN;
    }

    if t < 0.0 {
        1.0 - upper_half_cdf(-t, df)
    } else {
        upper_half_cdf(t, df)
    }
}

fn upper_half_cdf(t: f64, df: f64) -> f64 {
    if t == 0.0 {
        return 0.5;
    }
    if t.is_infinite() {
        return 1.0;
    }

    let intervals = interval_count(t);
    let integral = if df.is_infinite() {
        simpson(normal_pdf, t, intervals)
    } else {
        let normalizer = log_normalizer(df);
        let exponent = (df + 1.0) / 2.0;
        simpson(
            |x| (normalizer - exponent * (x * x / df).ln_1p()).exp(),
            t,
            intervals,
        )
    };

    (0.5 + integral).clamp(0.0, 1.0)
}

fn interval_count(t: f64) -> usize {
    let scaled = (t * INTERVALS_PER_UNIT).floor();
    let intervals = if scaled >= MAX_INTERVALS as f64 {
        MAX_INTERVALS
    } else {
        (scaled as usize).max(MIN_INTERVALS)
    };
    intervals + intervals % 2
}

/// Composite Simpson's rule over `[0, upper]`; `intervals` must be even.
fn simpson(f: impl Fn(f64) -> f64, upper: f64, intervals: usize) -> f64 {
    let h = upper / intervals as f64;
    let mut sum = f(0.0) + f(upper);

    for i in 1..intervals {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(i as f64 * h);
    }

    sum * h / 3.0
}

fn log_normalizer(df: f64) -> f64 {
    ln_gamma((df + 1.0) / 2.0) - ln_gamma(df / 2.0) - 0.5 * (df * PI).ln()
}

fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
