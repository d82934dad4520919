//! Sample containers and descriptive statistics.
//!
//! A [`Sample`] is the sorted, immutable set of measurements the estimators
//! share. [`SampleGroups`] carries the optional batch partition used only by
//! the pooled ANOVA method.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::BasisError;
use crate::stats;

/// Ascending-sorted, finite measurements.
///
/// # Examples
///
/// ```
/// use u_allowables::sample::Sample;
///
/// let s = Sample::new(vec![3.0, 1.0, 2.0]).unwrap();
/// assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
/// assert_eq!(s.min(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Builds a sample, sorting the values ascending.
    ///
    /// # Errors
    ///
    /// - [`BasisError::InvalidSampleSize`] when `values` is empty
    /// - [`BasisError::NonFiniteValue`] when a value is NaN or infinite
    pub fn new(mut values: Vec<f64>) -> Result<Self, BasisError> {
        if values.is_empty() {
            return Err(BasisError::InvalidSampleSize { n: 0 });
        }
        if let Some(&value) = values.iter().find(|v| !v.is_finite()) {
            return Err(BasisError::NonFiniteValue { value });
        }
        values.sort_by(|a, b| a.total_cmp(b));
        Ok(Self { values })
    }

    /// Sorted observations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sample size n.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a sample holds at least one value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest observation, x₍₁₎.
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// Largest observation, x₍ₙ₎.
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// 1-based order statistic x₍ᵣ₎, `None` when r is outside 1..=n.
    pub fn order_statistic(&self, rank: usize) -> Option<f64> {
        rank.checked_sub(1).and_then(|i| self.values.get(i)).copied()
    }
}

/// Partition of the sample into labelled batches.
///
/// Groups are kept in label order. An empty or single-group partition means
/// pooling does not apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleGroups {
    groups: BTreeMap<String, Vec<f64>>,
}

impl SampleGroups {
    /// No grouping information.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds groups from `(label, value)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (label, value) in pairs {
            groups.entry(label.into()).or_default().push(value);
        }
        Self { groups }
    }

    /// Number of distinct groups k.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// `true` when no group labels were supplied.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Pooling needs at least two groups.
    pub fn is_poolable_partition(&self) -> bool {
        self.groups.len() >= 2
    }

    /// Group members in label order.
    pub fn slices(&self) -> Vec<&[f64]> {
        self.groups.values().map(Vec::as_slice).collect()
    }
}

/// Overall descriptive statistics reported with every result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Sample size.
    pub n: usize,
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub sd: f64,
    /// Coefficient of variation in percent; 0 when the mean is 0.
    pub cov: f64,
}

impl SampleSummary {
    /// Computes n, mean, standard deviation and coefficient of variation.
    ///
    /// # Errors
    ///
    /// [`BasisError::InvalidSampleSize`] when n < 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_allowables::sample::{Sample, SampleSummary};
    ///
    /// let s = Sample::new(vec![-2.0, -1.0, 0.0, 1.0, 2.0]).unwrap();
    /// let summary = SampleSummary::compute(&s).unwrap();
    /// assert_eq!(summary.cov, 0.0);
    /// ```
    pub fn compute(sample: &Sample) -> Result<Self, BasisError> {
        let n = sample.len();
        let invalid = BasisError::InvalidSampleSize { n };
        if n < 2 {
            return Err(invalid);
        }
        let data = sample.values();
        let mean = stats::mean(data).ok_or(invalid)?;
        let sd = stats::std_dev(data).ok_or(BasisError::InvalidSampleSize { n })?;
        let cov = if mean != 0.0 { sd / mean * 100.0 } else { 0.0 };
        Ok(Self { n, mean, sd, cov })
    }
}
