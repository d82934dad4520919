//! Descriptive statistics over `f64` slices.
//!
//! Thin `Option`-returning wrappers around `statrs` so callers can use `?`
//! on degenerate input instead of checking for `NaN`.

use statrs::statistics::Statistics;

/// Arithmetic mean. `None` for empty or non-finite input.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let m = data.iter().mean();
    m.is_finite().then_some(m)
}

/// Sample variance (n - 1 denominator). `None` if fewer than 2 values.
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let v = data.iter().variance();
    v.is_finite().then_some(v)
}

/// Sample standard deviation (n - 1 denominator). `None` if fewer than 2 values.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}
