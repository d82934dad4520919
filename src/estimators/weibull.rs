//! Weibull basis values.
//!
//! ```text
//! q_B = (-ln 0.90)^(1/β),   corr_B = exp(-V_b / (β √n)),   B = η · q_B · corr_B
//! q_A = (-ln 0.99)^(1/β),   corr_A = exp(-V_a / (β √n)),   A = η · q_A · corr_A
//! ```
//!
//! Validity is a shape heuristic, not a goodness-of-fit test.

use tracing::{debug, warn};

use super::{finite, BasisCandidate, CandidateDetail, Method, Validity, WeibullDetail};
use crate::backend::StatsBackend;
use crate::sample::Sample;
use crate::tables::{LookupTable, WeibullRow};
use crate::tolerance::BasisLevel;

/// The Weibull method is valid when the fitted shape exceeds this value.
pub const WEIBULL_SHAPE_THRESHOLD: f64 = 2.0;

/// Weibull candidate.
///
/// A missing correction row leaves B and A undefined while the validity
/// still follows the shape threshold. A failed fit fails the candidate.
pub fn estimate<S, T>(sample: &Sample, table: &T, backend: &S) -> BasisCandidate
where
    S: StatsBackend + ?Sized,
    T: LookupTable<Row = WeibullRow> + ?Sized,
{
    let n = sample.len();
    let row = table.lookup(n);
    let (v_b, v_a) = (row.map(|r| r.v_b), row.map(|r| r.v_a));

    let Some(fit) = backend.weibull_fit(sample.values()) else {
        warn!(n, "Weibull fit failed");
        return BasisCandidate {
            method: Method::Weibull,
            b_basis: None,
            a_basis: None,
            validity: Validity::Fail,
            detail: CandidateDetail::Weibull(WeibullDetail {
                shape: None,
                scale: None,
                v_b,
                v_a,
            }),
        };
    };

    let validity = Validity::from_bool(fit.shape > WEIBULL_SHAPE_THRESHOLD);

    let (b_basis, a_basis) = match row {
        Some(r) => {
            let root_n = (n as f64).sqrt();
            let basis = |level: BasisLevel, v: f64| {
                let q = (-level.coverage().ln()).powf(1.0 / fit.shape);
                let corr = (-v / (fit.shape * root_n)).exp();
                finite(fit.scale * q * corr)
            };
            (basis(BasisLevel::B, r.v_b), basis(BasisLevel::A, r.v_a))
        }
        None => {
            debug!(n, "no Weibull correction row");
            (None, None)
        }
    };

    debug!(shape = fit.shape, scale = fit.scale, ?validity, ?b_basis, ?a_basis, "Weibull estimate");

    BasisCandidate {
        method: Method::Weibull,
        b_basis,
        a_basis,
        validity,
        detail: CandidateDetail::Weibull(WeibullDetail {
            shape: Some(fit.shape),
            scale: Some(fit.scale),
            v_b,
            v_a,
        }),
    }
}
