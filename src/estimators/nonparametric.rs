//! Hanson–Koopmans nonparametric basis values.
//!
//! ```text
//! B = x₍r_b₎ · (x₍₁₎ / x₍r_b₎)^k_b
//! A = x₍ₙ₎  · (x₍₁₎ / x₍ₙ₎)^k_a
//! ```
//!
//! Factors come from an exact-n table; there is no interpolation. The method
//! has no validity test and is the unconditional fallback of the selector.
//!
//! # References
//!
//! - Hanson, D.L. & Koopmans, L.H. (1964). "Tolerance limits for the class of
//!   distributions with increasing hazard rates". *Annals of Mathematical
//!   Statistics*, 35, 1561–1570.

use tracing::debug;

use super::{finite, BasisCandidate, CandidateDetail, HkDetail, Method, Validity};
use crate::sample::Sample;
use crate::tables::{HkRow, LookupTable};

/// Hanson–Koopmans candidate.
///
/// # Examples
///
/// ```
/// use u_allowables::estimators::nonparametric;
/// use u_allowables::sample::Sample;
/// use u_allowables::tables::{HkRow, HkTable};
///
/// let sample = Sample::new(vec![90.0, 95.0, 100.0, 105.0]).unwrap();
/// let table: HkTable = [(4, HkRow { rank_b: Some(2), k_b: Some(1.0), k_a: Some(1.0) })]
///     .into_iter()
///     .collect();
/// let c = nonparametric::estimate(&sample, &table);
/// // exponent 1 collapses to the sample minimum
/// assert!((c.b_basis.unwrap() - 90.0).abs() < 1e-12);
/// ```
pub fn estimate<T>(sample: &Sample, table: &T) -> BasisCandidate
where
    T: LookupTable<Row = HkRow> + ?Sized,
{
    let n = sample.len();
    let row = table.lookup(n).unwrap_or_default();
    let x_min = sample.min();

    let order_statistic = row.rank_b.and_then(|r| sample.order_statistic(r));

    let b_basis = match (order_statistic, row.k_b) {
        (Some(x_r), Some(k_b)) => finite(x_r * (x_min / x_r).powf(k_b)),
        _ => None,
    };

    let a_basis = row.k_a.and_then(|k_a| {
        let x_max = sample.max();
        finite(x_max * (x_min / x_max).powf(k_a))
    });

    debug!(n, ?row, ?b_basis, ?a_basis, "Hanson-Koopmans estimate");

    BasisCandidate {
        method: Method::Nonparametric,
        b_basis,
        a_basis,
        validity: Validity::NotApplicable,
        detail: CandidateDetail::Nonparametric(HkDetail {
            rank_b: row.rank_b,
            order_statistic,
            k_b: row.k_b,
            k_a: row.k_a,
        }),
    }
}
