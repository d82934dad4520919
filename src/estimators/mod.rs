//! Basis-value estimators.
//!
//! Each estimator is a pure function of the shared sorted sample, its
//! summary statistics, table lookups and the numeric backend. None of them
//! depends on another's output, so they can run in any order.
//!
//! - [`normal`] — mean − k·sd with Anderson–Darling goodness of fit
//! - [`lognormal`] — the normal method applied to ln(x)
//! - [`weibull`] — MLE fit with small-sample correction factors
//! - [`nonparametric`] — Hanson–Koopmans order-statistic bounds
//!
//! The pooled ANOVA estimator lives in [`crate::pooling`].

pub mod lognormal;
pub mod nonparametric;
pub mod normal;
pub mod weibull;

use std::fmt;

use serde::Serialize;

/// The five basis-value methods, with their fixed report labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    /// Pooled across batches using one-way ANOVA.
    #[serde(rename = "ANOVA (Pooled)")]
    AnovaPooled,
    /// Normal distribution.
    #[serde(rename = "Normal")]
    Normal,
    /// Lognormal distribution.
    #[serde(rename = "Lognormal")]
    Lognormal,
    /// Two-parameter Weibull distribution.
    #[serde(rename = "Weibull")]
    Weibull,
    /// Distribution-free Hanson–Koopmans bounds.
    #[serde(rename = "Non-Parametric (HK)")]
    Nonparametric,
}

impl Method {
    /// All methods in selection-priority order.
    pub const ALL: [Method; 5] = [
        Method::AnovaPooled,
        Method::Normal,
        Method::Lognormal,
        Method::Weibull,
        Method::Nonparametric,
    ];

    /// Report label.
    pub fn label(self) -> &'static str {
        match self {
            Method::AnovaPooled => "ANOVA (Pooled)",
            Method::Normal => "Normal",
            Method::Lognormal => "Lognormal",
            Method::Weibull => "Weibull",
            Method::Nonparametric => "Non-Parametric (HK)",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validity signal attached to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// Goodness-of-fit or shape criterion met (for ANOVA: poolable).
    Pass,
    /// Criterion not met.
    Fail,
    /// The method has no validity criterion.
    NotApplicable,
}

impl Validity {
    /// `Pass` when `ok`, otherwise `Fail`.
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Validity::Pass
        } else {
            Validity::Fail
        }
    }

    /// `true` for [`Validity::Pass`].
    pub fn passed(self) -> bool {
        self == Validity::Pass
    }
}

/// Diagnostic inputs of the pooled ANOVA method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnovaDetail {
    /// Number of groups k.
    pub groups: usize,
    /// Effective group size n̄.
    pub n_bar: f64,
    /// Between-group mean square.
    pub msb: f64,
    /// Within-group mean square.
    pub mse: f64,
    /// Pooled standard deviation.
    pub s_pool: f64,
    /// F-test p-value, `None` when the test is undefined.
    pub p_value: Option<f64>,
    /// B-basis multiplier.
    pub t_b: f64,
    /// A-basis multiplier.
    pub t_a: f64,
}

/// Diagnostic inputs of the normal and lognormal methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoodnessOfFitDetail {
    /// k(n, B).
    pub k_b: f64,
    /// k(n, A).
    pub k_a: f64,
    /// Anderson–Darling statistic, `None` when it cannot be computed.
    pub ad_statistic: Option<f64>,
    /// Critical value compared against the statistic.
    pub ad_critical: Option<f64>,
}

/// Diagnostic inputs of the Weibull method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeibullDetail {
    /// Fitted shape, `None` when the fit failed.
    pub shape: Option<f64>,
    /// Fitted scale, `None` when the fit failed.
    pub scale: Option<f64>,
    /// B-basis correction from the table.
    pub v_b: Option<f64>,
    /// A-basis correction from the table.
    pub v_a: Option<f64>,
}

/// Diagnostic inputs of the Hanson–Koopmans method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HkDetail {
    /// Rank r_b of the B-basis order statistic.
    pub rank_b: Option<usize>,
    /// Order statistic x₍r_b₎.
    pub order_statistic: Option<f64>,
    /// B-basis exponent.
    pub k_b: Option<f64>,
    /// A-basis exponent.
    pub k_a: Option<f64>,
}

/// Method-specific diagnostics carried by a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CandidateDetail {
    /// Pooled ANOVA; `None` when pooling does not apply.
    Anova(Option<AnovaDetail>),
    /// Normal or lognormal.
    GoodnessOfFit(GoodnessOfFitDetail),
    /// Weibull.
    Weibull(WeibullDetail),
    /// Hanson–Koopmans.
    Nonparametric(HkDetail),
}

/// One estimator's output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasisCandidate {
    /// Producing method.
    pub method: Method,
    /// B-basis value, `None` when undefined.
    pub b_basis: Option<f64>,
    /// A-basis value, `None` when undefined.
    pub a_basis: Option<f64>,
    /// Validity signal.
    pub validity: Validity,
    /// Method-specific diagnostics.
    pub detail: CandidateDetail,
}

impl BasisCandidate {
    /// The method's headline diagnostic statistic: ANOVA p-value,
    /// Anderson–Darling statistic, or Weibull shape. HK has none.
    pub fn diagnostic(&self) -> Option<f64> {
        match self.detail {
            CandidateDetail::Anova(d) => d.and_then(|d| d.p_value),
            CandidateDetail::GoodnessOfFit(d) => d.ad_statistic,
            CandidateDetail::Weibull(d) => d.shape,
            CandidateDetail::Nonparametric(_) => None,
        }
    }
}

/// Drops non-finite basis values so they render as absent.
pub(crate) fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
