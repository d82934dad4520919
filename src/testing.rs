//! Hypothesis tests used by the basis-value estimators.
//!
//! - [`anderson_darling_normal`] — Anderson–Darling goodness of fit to a
//!   normal distribution with estimated mean and standard deviation.
//! - [`one_way_anova`] — one-way analysis of variance across sample groups.
//!
//! # Examples
//!
//! ```
//! use u_allowables::testing::one_way_anova;
//!
//! let group1 = [5.0, 6.0, 7.0, 5.5, 6.5];
//! let group2 = [8.0, 9.0, 8.5, 9.5, 8.0];
//! let r = one_way_anova(&[&group1, &group2]).unwrap();
//! assert!(r.p_value < 0.01);
//! ```

use crate::special;
use crate::stats;

// ---------------------------------------------------------------------------
// Anderson-Darling
// ---------------------------------------------------------------------------

/// Asymptotic critical values of A² for the normal case with both
/// parameters estimated (Stephens 1974, Case 3), at the 15 %, 10 %, 5 %,
/// 2.5 % and 1 % levels.
pub const AD_NORMAL_CRITICAL_BASE: [f64; 5] = [0.576, 0.656, 0.787, 0.918, 1.092];

/// Result of the Anderson–Darling normality test.
#[derive(Debug, Clone, Copy)]
pub struct AndersonDarlingResult {
    /// The raw A² statistic.
    pub statistic: f64,
    /// Finite-sample critical values `base / (1 + 4/n - 25/n²)`, rounded
    /// to 3 decimals, in the order of [`AD_NORMAL_CRITICAL_BASE`].
    pub critical_values: [f64; 5],
}

/// Anderson–Darling test against a normal distribution with mean and
/// standard deviation estimated from the data.
///
/// # Algorithm
///
/// 1. Sort and standardize: wᵢ = (x₍ᵢ₎ - x̄) / s, s with n-1 denominator
/// 2. A² = -n - (1/n) Σᵢ (2i-1) [ln Φ(wᵢ) + ln(1 - Φ(w₍ₙ₊₁₋ᵢ₎))]
/// 3. Critical values: Stephens' asymptotic points divided by
///    (1 + 4/n - 25/n²), rounded to 3 decimals as published tables are
///
/// For very small n the correction factor turns negative, so every critical
/// value is negative and no statistic can pass.
///
/// # Returns
///
/// `None` if n < 2, any value is non-finite, or all values are identical.
///
/// # References
///
/// - Anderson & Darling (1952). "Asymptotic theory of certain goodness of
///   fit criteria based on stochastic processes". Annals of Mathematical
///   Statistics, 23(2), 193–212.
/// - Stephens (1974). "EDF statistics for goodness of fit and some
///   comparisons". JASA, 69(347), 730–737.
///
/// # Examples
///
/// ```
/// use u_allowables::testing::anderson_darling_normal;
///
/// let data = [-1.5, -1.0, -0.5, 0.0, 0.0, 0.5, 1.0, 1.5];
/// let r = anderson_darling_normal(&data).unwrap();
/// assert!(r.statistic < r.critical_values[2]);
/// ```
pub fn anderson_darling_normal(data: &[f64]) -> Option<AndersonDarlingResult> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    if data.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mean = stats::mean(data)?;
    let sd = stats::std_dev(data)?;

    if sd < 1e-300 {
        return None; // zero variance
    }

    let mut x: Vec<f64> = data.to_vec();
    x.sort_by(|a, b| a.total_cmp(b));

    let nf = n as f64;

    let mut s = 0.0;
    for i in 0..n {
        let z = (x[i] - mean) / sd;
        let z_rev = (x[n - 1 - i] - mean) / sd;
        // Clamp to avoid ln(0) in the extreme tails
        let ln_cdf = special::standard_normal_cdf(z).max(1e-300).ln();
        let ln_sf = special::standard_normal_sf(z_rev).max(1e-300).ln();

        let coeff = (2 * (i + 1) - 1) as f64;
        s += coeff * (ln_cdf + ln_sf);
    }

    let a2 = -nf - s / nf;

    let correction = 1.0 + 4.0 / nf - 25.0 / (nf * nf);
    let critical_values = AD_NORMAL_CRITICAL_BASE.map(|c| round3(c / correction));

    Some(AndersonDarlingResult {
        statistic: a2,
        critical_values,
    })
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

// ---------------------------------------------------------------------------
// ANOVA
// ---------------------------------------------------------------------------

/// Result of one-way ANOVA.
#[derive(Debug, Clone, Copy)]
pub struct AnovaResult {
    /// F-statistic.
    pub f_statistic: f64,
    /// p-value, P(F > f).
    pub p_value: f64,
}

/// One-way ANOVA: H₀: all group means are equal.
///
/// # Algorithm
///
/// F = MS_between / MS_within where
/// MS_between = SS_between / (k-1),
/// MS_within = SS_within / (N-k).
///
/// # Returns
///
/// `None` if fewer than 2 groups, any group is empty, N = k, a value is
/// non-finite, or both mean squares are zero (F undefined).
///
/// # References
///
/// Fisher (1925). "Statistical Methods for Research Workers".
pub fn one_way_anova(groups: &[&[f64]]) -> Option<AnovaResult> {
    let k = groups.len();
    if k < 2 {
        return None;
    }

    for g in groups {
        if g.is_empty() || g.iter().any(|v| !v.is_finite()) {
            return None;
        }
    }

    let total_n: usize = groups.iter().map(|g| g.len()).sum();

    let grand_sum: f64 = groups.iter().flat_map(|g| g.iter()).sum();
    let grand_mean = grand_sum / total_n as f64;

    let group_means: Vec<f64> = groups
        .iter()
        .map(|g| g.iter().sum::<f64>() / g.len() as f64)
        .collect();

    let ss_between: f64 = groups
        .iter()
        .zip(group_means.iter())
        .map(|(g, &gm)| g.len() as f64 * (gm - grand_mean).powi(2))
        .sum();

    let ss_within: f64 = groups
        .iter()
        .zip(group_means.iter())
        .map(|(g, &gm)| g.iter().map(|&x| (x - gm).powi(2)).sum::<f64>())
        .sum();

    let df_between = k - 1;
    let df_within = total_n - k;

    if df_within == 0 {
        return None;
    }

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;

    let f_statistic = if ms_within > 1e-300 {
        ms_between / ms_within
    } else if ms_between > 1e-300 {
        f64::INFINITY
    } else {
        return None;
    };

    let p_value = special::f_distribution_sf(f_statistic, df_between as f64, df_within as f64)?;

    Some(AnovaResult {
        f_statistic,
        p_value,
    })
}
