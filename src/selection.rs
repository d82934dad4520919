//! Fixed-priority method selection.
//!
//! The first matching rule wins:
//!
//! 1. pooling applies and the batch F-test has p ≤ [`POOLABILITY_ALPHA`]
//! 2. the normal candidate passes Anderson–Darling
//! 3. the lognormal candidate passes Anderson–Darling
//! 4. the fitted Weibull shape exceeds 2
//! 5. Hanson–Koopmans, unconditionally
//!
//! Rule 1 fires on a *significant* batch difference, which is the opposite
//! sense of the poolability label carried by the ANOVA candidate
//! (`Pass` when p > α). Both are kept as published; a significant batch
//! effect therefore selects the pooled values while reporting "Fail".

use serde::Serialize;

use crate::estimators::{BasisCandidate, CandidateDetail, Method};
use crate::pooling::POOLABILITY_ALPHA;
use crate::sample::SampleSummary;

/// `true` when the pooled ANOVA rule fires for `anova`.
///
/// Requires an applicable pooling detail with a p-value at or below
/// [`POOLABILITY_ALPHA`]; the candidate's own validity is not consulted.
pub fn anova_triggered(anova: &BasisCandidate) -> bool {
    match anova.detail {
        CandidateDetail::Anova(Some(detail)) => {
            detail.p_value.is_some_and(|p| p <= POOLABILITY_ALPHA)
        }
        _ => false,
    }
}

/// Picks the reported method from the four rule-bearing candidates.
///
/// # Examples
///
/// ```
/// use u_allowables::estimators::{
///     BasisCandidate, CandidateDetail, GoodnessOfFitDetail, Method, Validity, WeibullDetail,
/// };
/// use u_allowables::selection::select_method;
///
/// let gof = |method, validity| BasisCandidate {
///     method,
///     b_basis: None,
///     a_basis: None,
///     validity,
///     detail: CandidateDetail::GoodnessOfFit(GoodnessOfFitDetail {
///         k_b: 2.0,
///         k_a: 3.0,
///         ad_statistic: None,
///         ad_critical: None,
///     }),
/// };
/// let anova = BasisCandidate {
///     method: Method::AnovaPooled,
///     b_basis: None,
///     a_basis: None,
///     validity: Validity::Fail,
///     detail: CandidateDetail::Anova(None),
/// };
/// let weibull = BasisCandidate {
///     method: Method::Weibull,
///     b_basis: None,
///     a_basis: None,
///     validity: Validity::Fail,
///     detail: CandidateDetail::Weibull(WeibullDetail {
///         shape: Some(1.2),
///         scale: Some(100.0),
///         v_b: None,
///         v_a: None,
///     }),
/// };
///
/// let normal = gof(Method::Normal, Validity::Fail);
/// let lognormal = gof(Method::Lognormal, Validity::Pass);
/// assert_eq!(select_method(&anova, &normal, &lognormal, &weibull), Method::Lognormal);
/// ```
pub fn select_method(
    anova: &BasisCandidate,
    normal: &BasisCandidate,
    lognormal: &BasisCandidate,
    weibull: &BasisCandidate,
) -> Method {
    if anova_triggered(anova) {
        Method::AnovaPooled
    } else if normal.validity.passed() {
        Method::Normal
    } else if lognormal.validity.passed() {
        Method::Lognormal
    } else if weibull.validity.passed() {
        Method::Weibull
    } else {
        Method::Nonparametric
    }
}

/// Complete outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    /// Reported method.
    pub selected: Method,
    /// Descriptive statistics of the whole sample.
    pub summary: SampleSummary,
    /// Pooled ANOVA candidate.
    pub anova: BasisCandidate,
    /// Normal candidate.
    pub normal: BasisCandidate,
    /// Lognormal candidate.
    pub lognormal: BasisCandidate,
    /// Weibull candidate.
    pub weibull: BasisCandidate,
    /// Hanson–Koopmans candidate.
    pub nonparametric: BasisCandidate,
}

impl SelectionResult {
    /// Candidates in report order: ANOVA, Normal, Lognormal,
    /// Nonparametric, Weibull.
    pub fn candidates(&self) -> [&BasisCandidate; 5] {
        [
            &self.anova,
            &self.normal,
            &self.lognormal,
            &self.nonparametric,
            &self.weibull,
        ]
    }

    /// The candidate of the selected method.
    pub fn selected_candidate(&self) -> &BasisCandidate {
        match self.selected {
            Method::AnovaPooled => &self.anova,
            Method::Normal => &self.normal,
            Method::Lognormal => &self.lognormal,
            Method::Weibull => &self.weibull,
            Method::Nonparametric => &self.nonparametric,
        }
    }
}
