//! Pooled ANOVA basis values across batches.
//!
//! Between- and within-batch mean squares give a pooled standard deviation
//!
//! ```text
//! n̄      = (N − Σnᵢ²/N) / (k − 1)
//! MSB    = Σ nᵢ (x̄ᵢ − x̄)² / (k − 1)
//! MSE    = Σᵢ Σⱼ (xᵢⱼ − x̄ᵢ)² / (N − k)
//! s_pool = √max(0, (MSB − MSE)/n̄ + MSE)
//! ```
//!
//! and basis values x̄ − t·s_pool with fixed published multipliers.
//!
//! The candidate's validity is the *poolability* label: pass when the F-test
//! p-value exceeds [`POOLABILITY_ALPHA`]. The selector uses the same p-value
//! with the opposite sense (see [`crate::selection`]).

use tracing::{debug, warn};

use crate::backend::StatsBackend;
use crate::estimators::{finite, AnovaDetail, BasisCandidate, CandidateDetail, Method, Validity};
use crate::sample::{SampleGroups, SampleSummary};

/// B-basis multiplier for the pooled method.
pub const ANOVA_T_B: f64 = 1.93;

/// A-basis multiplier for the pooled method.
pub const ANOVA_T_A: f64 = 3.30;

/// Significance level of the batch-equality F-test.
pub const POOLABILITY_ALPHA: f64 = 0.05;

/// Mean squares and pooled standard deviation of a batch partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PooledVariance {
    /// Number of groups k.
    pub groups: usize,
    /// Effective group size n̄.
    pub n_bar: f64,
    /// Between-group mean square.
    pub msb: f64,
    /// Within-group mean square.
    pub mse: f64,
    /// Pooled standard deviation, never negative.
    pub s_pool: f64,
}

/// Pooled standard deviation from its mean-square components, clamping
/// negative variance estimates to zero.
///
/// # Examples
///
/// ```
/// use u_allowables::pooling::pooled_sd;
///
/// // MSB < MSE with a small n̄ would give a negative variance
/// assert_eq!(pooled_sd(1.0, 10.0, 0.5), 0.0);
/// ```
pub fn pooled_sd(msb: f64, mse: f64, n_bar: f64) -> f64 {
    ((msb - mse) / n_bar + mse).max(0.0).sqrt()
}

/// Mean squares of `groups` around the overall mean `grand_mean` of a
/// sample of size `total_n`.
///
/// N is the whole sample size, which exceeds Σnᵢ when some observations
/// carry no batch label; both n̄ and MSE use it.
///
/// Returns `None` for fewer than 2 groups, an empty group, or N ≤ k
/// (no within-group degrees of freedom).
pub fn pooled_variance(
    groups: &[&[f64]],
    total_n: usize,
    grand_mean: f64,
) -> Option<PooledVariance> {
    let k = groups.len();
    if k < 2 || groups.iter().any(|g| g.is_empty()) {
        return None;
    }

    if total_n <= k {
        return None;
    }

    let nf = total_n as f64;
    let kf = k as f64;
    let sum_sq_sizes: f64 = groups.iter().map(|g| (g.len() * g.len()) as f64).sum();
    let n_bar = (nf - sum_sq_sizes / nf) / (kf - 1.0);

    let means: Vec<f64> = groups
        .iter()
        .map(|g| g.iter().sum::<f64>() / g.len() as f64)
        .collect();

    let msb = groups
        .iter()
        .zip(&means)
        .map(|(g, &m)| g.len() as f64 * (m - grand_mean).powi(2))
        .sum::<f64>()
        / (kf - 1.0);

    let mse = groups
        .iter()
        .zip(&means)
        .map(|(g, &m)| g.iter().map(|&x| (x - m).powi(2)).sum::<f64>())
        .sum::<f64>()
        / (nf - kf);

    Some(PooledVariance {
        groups: k,
        n_bar,
        msb,
        mse,
        s_pool: pooled_sd(msb, mse, n_bar),
    })
}

/// Pooled ANOVA candidate.
///
/// Pooling applies only to a partition with at least two groups; otherwise
/// the candidate carries no values and fails, without consulting the
/// backend.
pub fn estimate<S: StatsBackend + ?Sized>(
    summary: &SampleSummary,
    groups: &SampleGroups,
    backend: &S,
) -> BasisCandidate {
    let not_applicable = BasisCandidate {
        method: Method::AnovaPooled,
        b_basis: None,
        a_basis: None,
        validity: Validity::Fail,
        detail: CandidateDetail::Anova(None),
    };

    if !groups.is_poolable_partition() {
        debug!(groups = groups.len(), "pooling skipped: fewer than 2 groups");
        return not_applicable;
    }

    let slices = groups.slices();
    let Some(pv) = pooled_variance(&slices, summary.n, summary.mean) else {
        warn!(groups = groups.len(), "pooling skipped: no within-group degrees of freedom");
        return not_applicable;
    };

    let p_value = backend.one_way_anova_p(&slices);
    let validity = Validity::from_bool(p_value.is_some_and(|p| p > POOLABILITY_ALPHA));

    let b_basis = finite(summary.mean - ANOVA_T_B * pv.s_pool);
    let a_basis = finite(summary.mean - ANOVA_T_A * pv.s_pool);

    debug!(
        groups = pv.groups,
        n_bar = pv.n_bar,
        msb = pv.msb,
        mse = pv.mse,
        s_pool = pv.s_pool,
        ?p_value,
        "pooled ANOVA estimate"
    );

    BasisCandidate {
        method: Method::AnovaPooled,
        b_basis,
        a_basis,
        validity,
        detail: CandidateDetail::Anova(Some(AnovaDetail {
            groups: pv.groups,
            n_bar: pv.n_bar,
            msb: pv.msb,
            mse: pv.mse,
            s_pool: pv.s_pool,
            p_value,
            t_b: ANOVA_T_B,
            t_a: ANOVA_T_A,
        })),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pooled_sd_never_negative(
            g1 in proptest::collection::vec(-1e3_f64..1e3, 1..=10),
            g2 in proptest::collection::vec(-1e3_f64..1e3, 1..=10),
            g3 in proptest::collection::vec(-1e3_f64..1e3, 2..=10),
        ) {
            let all: Vec<f64> = g1.iter().chain(&g2).chain(&g3).copied().collect();
            let grand = all.iter().sum::<f64>() / all.len() as f64;
            let pv = pooled_variance(&[&g1, &g2, &g3], all.len(), grand).unwrap();
            prop_assert!(pv.s_pool >= 0.0 && pv.s_pool.is_finite(), "s_pool = {}", pv.s_pool);
        }

        #[test]
        fn clamp_holds_for_synthetic_components(
            msb in 0.0_f64..1e3,
            mse in 0.0_f64..1e3,
            n_bar in 0.01_f64..50.0,
        ) {
            prop_assert!(pooled_sd(msb, mse, n_bar) >= 0.0);
        }
    }
}
