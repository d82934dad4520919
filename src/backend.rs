//! Numeric primitives consumed by the estimators.
//!
//! The engine never calls a distribution routine directly; it goes through
//! [`StatsBackend`], so tests can substitute deterministic fakes and the
//! decision logic stays independent of the numeric implementation.
//! [`StatrsBackend`] is the production implementation.

use tracing::debug;

use crate::special;
use crate::testing::{self, AndersonDarlingResult};
use crate::weibull::{self, WeibullMleResult};

/// Fitted two-parameter Weibull (location fixed at zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullFit {
    /// Shape parameter.
    pub shape: f64,
    /// Scale parameter.
    pub scale: f64,
}

impl From<WeibullMleResult> for WeibullFit {
    fn from(r: WeibullMleResult) -> Self {
        Self {
            shape: r.shape,
            scale: r.scale,
        }
    }
}

/// Statistical primitives required by the basis-value engine.
///
/// Implementations must be pure: the same input always yields the same
/// output and no call mutates shared state.
pub trait StatsBackend {
    /// Standard normal quantile Φ⁻¹(p).
    fn normal_quantile(&self, p: f64) -> f64;

    /// Quantile of the noncentral t distribution.
    fn noncentral_t_quantile(&self, p: f64, df: f64, noncentrality: f64) -> Option<f64>;

    /// Anderson–Darling statistic and critical values against a normal
    /// distribution with estimated parameters.
    fn anderson_darling_normal(&self, data: &[f64]) -> Option<AndersonDarlingResult>;

    /// p-value of a one-way F-test across `groups`.
    fn one_way_anova_p(&self, groups: &[&[f64]]) -> Option<f64>;

    /// Two-parameter Weibull maximum-likelihood fit.
    fn weibull_fit(&self, data: &[f64]) -> Option<WeibullFit>;
}

/// [`StatsBackend`] built on `statrs` special functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatrsBackend;

impl StatsBackend for StatrsBackend {
    fn normal_quantile(&self, p: f64) -> f64 {
        special::inverse_normal_cdf(p)
    }

    fn noncentral_t_quantile(&self, p: f64, df: f64, noncentrality: f64) -> Option<f64> {
        special::noncentral_t_quantile(p, df, noncentrality)
    }

    fn anderson_darling_normal(&self, data: &[f64]) -> Option<AndersonDarlingResult> {
        testing::anderson_darling_normal(data)
    }

    fn one_way_anova_p(&self, groups: &[&[f64]]) -> Option<f64> {
        let r = testing::one_way_anova(groups)?;
        debug!(f = r.f_statistic, p = r.p_value, k = groups.len(), "batch F-test");
        Some(r.p_value)
    }

    fn weibull_fit(&self, data: &[f64]) -> Option<WeibullFit> {
        weibull::weibull_mle(data).map(WeibullFit::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statrs_backend_delegates() {
        let b = StatrsBackend;
        assert!((b.normal_quantile(0.5)).abs() < 1e-12);

        let data = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
        let fit = b.weibull_fit(&data).unwrap();
        let direct = weibull::weibull_mle(&data).unwrap();
        assert_eq!(fit.shape, direct.shape);
        assert_eq!(fit.scale, direct.scale);

        let p = b
            .one_way_anova_p(&[&[1.0, 2.0, 3.0], &[10.0, 11.0, 12.0]])
            .unwrap();
        assert!(p < 1e-3);
    }
}
