//! Deterministic [`StatsBackend`] for unit tests.

use crate::backend::{StatsBackend, WeibullFit};
use crate::testing::AndersonDarlingResult;

/// Critical values returned by [`StubBackend`]; tier 2 is 0.7.
pub(crate) const STUB_CRITICAL: [f64; 5] = [0.5, 0.6, 0.7, 0.8, 0.9];

/// Backend whose answers are fixed up front.
///
/// The Anderson–Darling statistic can differ between raw data and its log
/// transform: `ad_statistic` is returned when every value is positive and
/// above `log_threshold`, `ad_log_statistic` otherwise. Log-transformed
/// strength data falls below the threshold.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StubBackend {
    pub ad_statistic: Option<f64>,
    pub ad_log_statistic: Option<f64>,
    pub log_threshold: f64,
    pub anova_p: Option<f64>,
    pub weibull: Option<WeibullFit>,
    pub nct_quantile: Option<f64>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            ad_statistic: Some(0.3),
            ad_log_statistic: Some(0.3),
            log_threshold: 20.0,
            anova_p: None,
            weibull: Some(WeibullFit {
                shape: 10.0,
                scale: 100.0,
            }),
            nct_quantile: Some(6.0),
        }
    }
}

impl StubBackend {
    pub(crate) fn failing_fits() -> Self {
        Self {
            ad_statistic: Some(5.0),
            ad_log_statistic: Some(5.0),
            weibull: Some(WeibullFit {
                shape: 1.5,
                scale: 100.0,
            }),
            ..Self::default()
        }
    }
}

impl StatsBackend for StubBackend {
    fn normal_quantile(&self, p: f64) -> f64 {
        crate::special::inverse_normal_cdf(p)
    }

    fn noncentral_t_quantile(&self, _p: f64, _df: f64, _nc: f64) -> Option<f64> {
        self.nct_quantile
    }

    fn anderson_darling_normal(&self, data: &[f64]) -> Option<AndersonDarlingResult> {
        let raw = data.iter().all(|&x| x > self.log_threshold);
        let statistic = if raw {
            self.ad_statistic
        } else {
            self.ad_log_statistic
        }?;
        Some(AndersonDarlingResult {
            statistic,
            critical_values: STUB_CRITICAL,
        })
    }

    fn one_way_anova_p(&self, _groups: &[&[f64]]) -> Option<f64> {
        self.anova_p
    }

    fn weibull_fit(&self, _data: &[f64]) -> Option<WeibullFit> {
        self.weibull
    }
}
