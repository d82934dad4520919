//! One-sided normal tolerance factors.
//!
//! k(n, level) is the multiplier such that x̄ − k·s is a lower 95 %
//! confidence bound on the 10th (B-basis) or 1st (A-basis) percentile of a
//! normal population.
//!
//! # References
//!
//! - CMH-17-1G, Vol. 1, §8.3.4.3 (normal basis values).
//! - MIL-HDBK-17-1F, §8.3.4.3, asymptotic approximations for n > 15.

use serde::Serialize;

use crate::backend::StatsBackend;
use crate::error::BasisError;

/// Confidence level shared by both basis levels.
pub const CONFIDENCE: f64 = 0.95;

/// Largest n that uses the exact noncentral-t form.
pub const EXACT_FORM_MAX_N: usize = 15;

/// Basis level of a lower tolerance limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BasisLevel {
    /// 90 % coverage at 95 % confidence.
    B,
    /// 99 % coverage at 95 % confidence.
    A,
}

impl BasisLevel {
    /// Population proportion that must exceed the basis value.
    pub fn coverage(self) -> f64 {
        match self {
            BasisLevel::B => 0.90,
            BasisLevel::A => 0.99,
        }
    }
}

/// Tolerance factor k(n, level).
///
/// For n > 15 the closed-form approximation of the handbook is used:
///
/// ```text
/// B: 1.282 + exp(0.958 - 0.520 ln n + 3.19 / n)
/// A: 2.326 + exp(1.340 - 0.522 ln n + 3.87 / n)
/// ```
///
/// For n ≤ 15 the exact factor is `t'(0.95; n-1, Φ⁻¹(p)·√n) / √n`, where t' is
/// the noncentral-t quantile.
///
/// # Errors
///
/// - [`BasisError::InvalidSampleSize`] when n < 2
/// - [`BasisError::Numerical`] when the backend cannot produce the
///   noncentral-t quantile
///
/// # Examples
///
/// ```
/// use u_allowables::backend::StatrsBackend;
/// use u_allowables::tolerance::{tolerance_factor, BasisLevel};
///
/// let k = tolerance_factor(20, BasisLevel::B, &StatrsBackend).unwrap();
/// assert!((k - 1.926).abs() < 1e-3);
/// ```
pub fn tolerance_factor<S: StatsBackend + ?Sized>(
    n: usize,
    level: BasisLevel,
    backend: &S,
) -> Result<f64, BasisError> {
    if n < 2 {
        return Err(BasisError::InvalidSampleSize { n });
    }

    let nf = n as f64;
    if n > EXACT_FORM_MAX_N {
        let ln_n = nf.ln();
        let k = match level {
            BasisLevel::B => 1.282 + (0.958 - 0.520 * ln_n + 3.19 / nf).exp(),
            BasisLevel::A => 2.326 + (1.340 - 0.522 * ln_n + 3.87 / nf).exp(),
        };
        return Ok(k);
    }

    let delta = backend.normal_quantile(level.coverage()) * nf.sqrt();
    let t = backend
        .noncentral_t_quantile(CONFIDENCE, nf - 1.0, delta)
        .ok_or(BasisError::Numerical("noncentral-t quantile did not converge"))?;
    Ok(t / nf.sqrt())
}

/// B- and A-basis tolerance factors for one sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToleranceFactors {
    /// k(n, B).
    pub k_b: f64,
    /// k(n, A).
    pub k_a: f64,
}

impl ToleranceFactors {
    /// Computes both factors; shared by the normal and lognormal estimators.
    pub fn compute<S: StatsBackend + ?Sized>(n: usize, backend: &S) -> Result<Self, BasisError> {
        Ok(Self {
            k_b: tolerance_factor(n, BasisLevel::B, backend)?,
            k_a: tolerance_factor(n, BasisLevel::A, backend)?,
        })
    }
}
