//! Lognormal basis values.
//!
//! The normal method applied to ln(x), back-transformed with exp. The
//! tolerance factors are the ones already computed for the normal method.

use tracing::{debug, warn};

use super::normal::goodness_of_fit;
use super::{finite, BasisCandidate, CandidateDetail, GoodnessOfFitDetail, Method, Validity};
use crate::backend::StatsBackend;
use crate::sample::Sample;
use crate::stats;
use crate::tolerance::ToleranceFactors;

/// Lognormal-distribution candidate.
///
/// Non-positive observations have no logarithm; the candidate then fails
/// with undefined basis values.
pub fn estimate<S: StatsBackend + ?Sized>(
    sample: &Sample,
    factors: &ToleranceFactors,
    backend: &S,
) -> BasisCandidate {
    let failed = |ad_statistic: Option<f64>, ad_critical: Option<f64>| BasisCandidate {
        method: Method::Lognormal,
        b_basis: None,
        a_basis: None,
        validity: Validity::Fail,
        detail: CandidateDetail::GoodnessOfFit(GoodnessOfFitDetail {
            k_b: factors.k_b,
            k_a: factors.k_a,
            ad_statistic,
            ad_critical,
        }),
    };

    if sample.min() <= 0.0 {
        warn!(min = sample.min(), "lognormal method skipped: non-positive observation");
        return failed(None, None);
    }

    let ln_data: Vec<f64> = sample.values().iter().map(|x| x.ln()).collect();
    let (ad_statistic, ad_critical, validity) = goodness_of_fit(&ln_data, backend);

    let (Some(ln_mean), Some(ln_sd)) = (stats::mean(&ln_data), stats::std_dev(&ln_data)) else {
        return failed(ad_statistic, ad_critical);
    };

    let b_basis = finite((ln_mean - factors.k_b * ln_sd).exp());
    let a_basis = finite((ln_mean - factors.k_a * ln_sd).exp());

    debug!(ln_mean, ln_sd, ?ad_statistic, ?validity, ?b_basis, ?a_basis, "lognormal estimate");

    BasisCandidate {
        method: Method::Lognormal,
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
