//! End-to-end basis-value analysis.
//!
//! [`analyze`] runs every estimator over one sample and applies the
//! selection rules. It performs no I/O; loading and reporting live in
//! [`crate::io`].

use tracing::{debug, info};

use crate::backend::StatsBackend;
use crate::error::BasisError;
use crate::estimators::{lognormal, nonparametric, normal, weibull};
use crate::pooling;
use crate::sample::{Sample, SampleGroups, SampleSummary};
use crate::selection::{select_method, SelectionResult};
use crate::tables::{HkRow, LookupTable, ReferenceTables, WeibullRow};
use crate::tolerance::ToleranceFactors;

/// Computes all candidates for `sample` and selects the reported method.
///
/// `groups` may be empty or hold a single batch, in which case the pooled
/// ANOVA candidate is reported without values.
///
/// # Errors
///
/// - [`BasisError::InvalidSampleSize`] when the sample has fewer than 2
///   observations
/// - [`BasisError::Numerical`] when a tolerance factor cannot be computed
///
/// # Examples
///
/// ```
/// use u_allowables::analysis::analyze;
/// use u_allowables::backend::StatrsBackend;
/// use u_allowables::sample::{Sample, SampleGroups};
/// use u_allowables::tables::ReferenceTables;
///
/// let values: Vec<f64> = (0..12).map(|i| 100.0 + (i % 4) as f64).collect();
/// let sample = Sample::new(values).unwrap();
/// let tables: ReferenceTables = ReferenceTables::default();
/// let result = analyze(&sample, &SampleGroups::none(), &tables, &StatrsBackend).unwrap();
/// assert!(result.nonparametric.b_basis.is_none());
/// ```
pub fn analyze<S, H, W>(
    sample: &Sample,
    groups: &SampleGroups,
    tables: &ReferenceTables<H, W>,
    backend: &S,
) -> Result<SelectionResult, BasisError>
where
    S: StatsBackend + ?Sized,
    H: LookupTable<Row = HkRow>,
    W: LookupTable<Row = WeibullRow>,
{
    let n = sample.len();
    if n < 2 {
        return Err(BasisError::InvalidSampleSize { n });
    }

    let summary = SampleSummary::compute(sample)?;
    let factors = ToleranceFactors::compute(n, backend)?;
    debug!(
        n,
        mean = summary.mean,
        sd = summary.sd,
        cov = summary.cov,
        k_b = factors.k_b,
        k_a = factors.k_a,
        "sample summary"
    );

    let anova = pooling::estimate(&summary, groups, backend);
    let normal = normal::estimate(sample, &summary, &factors, backend);
    let lognormal = lognormal::estimate(sample, &factors, backend);
    let weibull = weibull::estimate(sample, &tables.weibull, backend);
    let nonparametric = nonparametric::estimate(sample, &tables.hk);

    let selected = select_method(&anova, &normal, &lognormal, &weibull);
    let result = SelectionResult {
        selected,
        summary,
        anova,
        normal,
        lognormal,
        weibull,
        nonparametric,
    };

    let chosen = result.selected_candidate();
    info!(
        n,
        groups = groups.len(),
        method = %selected,
        b_basis = ?chosen.b_basis,
        a_basis = ?chosen.a_basis,
        "basis method selected"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::{Method, Validity};
    use crate::tables::{HkTable, WeibullTable};
    use crate::test_support::StubBackend;

    fn no_tables() -> ReferenceTables {
        ReferenceTables::default()
    }

    fn strength_sample() -> Sample {
        Sample::new((0..12).map(|i| 100.0 + i as f64).collect()).unwrap()
    }

    #[test]
    fn test_rejects_single_observation() {
        let sample = Sample::new(vec![100.0]).unwrap();
        let err = analyze(
            &sample,
            &SampleGroups::none(),
            &no_tables(),
            &StubBackend::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BasisError::InvalidSampleSize { n: 1 }));
    }

    #[test]
    fn test_normal_selected_with_passing_fit() {
        let result = analyze(
            &strength_sample(),
            &SampleGroups::none(),
            &no_tables(),
            &StubBackend::default(),
        )
        .unwrap();
        assert_eq!(result.selected, Method::Normal);
        assert_eq!(result.summary.n, 12);
        assert_eq!(result.anova.b_basis, None);
    }

    #[test]
    fn test_falls_back_to_nonparametric() {
        let sample = strength_sample();
        let hk: HkTable = [(
            12,
            HkRow {
                rank_b: Some(2),
                k_b: Some(1.0),
                k_a: Some(1.0),
            },
        )]
        .into_iter()
        .collect();
        let tables = ReferenceTables {
            hk,
            weibull: WeibullTable::new(),
        };
        let result = analyze(&sample, &SampleGroups::none(), &tables, &StubBackend::failing_fits()).unwrap();
        assert_eq!(result.selected, Method::Nonparametric);
        assert!((result.nonparametric.b_basis.unwrap() - 100.0).abs() < 1e-9);
        assert_eq!(result.weibull.validity, Validity::Fail);
    }

    #[test]
    fn test_significant_batches_select_anova() {
        let sample = strength_sample();
        let groups = SampleGroups::from_pairs(
            sample
                .values()
                .iter()
                .enumerate()
                .map(|(i, &x)| ((i / 4).to_string(), x)),
        );
        let backend = StubBackend {
            anova_p: Some(0.001),
            ..StubBackend::default()
        };
        let result = analyze(&sample, &groups, &no_tables(), &backend).unwrap();
        assert_eq!(result.selected, Method::AnovaPooled);
        assert_eq!(result.anova.validity, Validity::Fail);
        assert!(result.anova.b_basis.is_some());
    }
}
