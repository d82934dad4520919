//! Normal basis values.
//!
//! B = x̄ − k(n, B)·s and A = x̄ − k(n, A)·s, valid when the Anderson–Darling
//! statistic is below the critical value at [`AD_CRITICAL_TIER`].

use tracing::debug;

use super::{finite, BasisCandidate, CandidateDetail, GoodnessOfFitDetail, Method, Validity};
use crate::backend::StatsBackend;
use crate::sample::{Sample, SampleSummary};
use crate::tolerance::ToleranceFactors;

/// Index into the Anderson–Darling critical-value table used for the
/// pass/fail decision. Tier 2 is the 5 % significance level
/// (tiers: 15 %, 10 %, 5 %, 2.5 %, 1 %).
pub const AD_CRITICAL_TIER: usize = 2;

/// Anderson–Darling statistic, its critical value and the resulting
/// validity for `data`. A statistic that cannot be computed fails.
pub(crate) fn goodness_of_fit<S: StatsBackend + ?Sized>(
    data: &[f64],
    backend: &S,
) -> (Option<f64>, Option<f64>, Validity) {
    match backend.anderson_darling_normal(data) {
        Some(ad) => {
            let critical = ad.critical_values[AD_CRITICAL_TIER];
            let validity = Validity::from_bool(ad.statistic < critical);
            (Some(ad.statistic), Some(critical), validity)
        }
        None => (None, None, Validity::Fail),
    }
}

/// Normal-distribution candidate.
///
/// # Examples
///
/// ```
/// use u_allowables::backend::StatrsBackend;
/// use u_allowables::estimators::normal;
/// use u_allowables::sample::{Sample, SampleSummary};
/// use u_allowables::tolerance::ToleranceFactors;
///
/// let sample = Sample::new((0..20).map(|i| 100.0 + (i % 5) as f64).collect()).unwrap();
/// let summary = SampleSummary::compute(&sample).unwrap();
/// let factors = ToleranceFactors::compute(sample.len(), &StatrsBackend).unwrap();
/// let c = normal::estimate(&sample, &summary, &factors, &StatrsBackend);
/// assert_eq!(c.b_basis, Some(summary.mean - factors.k_b * summary.sd));
/// ```
pub fn estimate<S: StatsBackend + ?Sized>(
    sample: &Sample,
    summary: &SampleSummary,
    factors: &ToleranceFactors,
    backend: &S,
) -> BasisCandidate {
    let (ad_statistic, ad_critical, validity) = goodness_of_fit(sample.values(), backend);

    let b_basis = finite(summary.mean - factors.k_b * summary.sd);
    let a_basis = finite(summary.mean - factors.k_a * summary.sd);

    debug!(?ad_statistic, ?ad_critical, ?validity, ?b_basis, ?a_basis, "normal estimate");

    BasisCandidate {
        method: Method::Normal,
        b_basis,
        a_basis,
        validity,
        detail: CandidateDetail::GoodnessOfFit(GoodnessOfFitDetail {
            k_b: factors.k_b,
            k_a: factors.k_a,
            ad_statistic,
            ad_critical,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubBackend;

    fn fixture() -> (Sample, SampleSummary, ToleranceFactors) {
        let sample = Sample::new(vec![98.0, 100.0, 102.0]).unwrap();
        let summary = SampleSummary::compute(&sample).unwrap();
        let factors = ToleranceFactors { k_b: 2.0, k_a: 3.0 };
        (sample, summary, factors)
    }

    fn with_ad(statistic: Option<f64>) -> StubBackend {
        StubBackend {
            ad_statistic: statistic,
            ..StubBackend::default()
        }
    }

    #[test]
    fn test_basis_values() {
        let (sample, summary, factors) = fixture();
        let c = estimate(&sample, &summary, &factors, &with_ad(Some(0.3)));
        assert_eq!(c.method, Method::Normal);
        assert_eq!(c.b_basis, Some(96.0));
        assert_eq!(c.a_basis, Some(94.0));
    }

    #[test]
    fn test_uses_tier_two_critical_value() {
        let (sample, summary, factors) = fixture();
        // 0.65 < 0.7 (tier 2) although it exceeds tiers 0 and 1
        let c = estimate(&sample, &summary, &factors, &with_ad(Some(0.65)));
        assert_eq!(c.validity, Validity::Pass);
        assert_eq!(c.diagnostic(), Some(0.65));

        let c = estimate(&sample, &summary, &factors, &with_ad(Some(0.7)));
        assert_eq!(c.validity, Validity::Fail, "pass requires strictly less");
    }

    #[test]
    fn test_missing_statistic_fails() {
        let (sample, summary, factors) = fixture();
        let c = estimate(&sample, &summary, &factors, &with_ad(None));
        assert_eq!(c.validity, Validity::Fail);
        assert_eq!(c.diagnostic(), None);
        assert!(c.b_basis.is_some());
    }
}
