//! Reference factor tables keyed by sample size.
//!
//! Both tables are exact-n lookups: a missing row is not an error, it only
//! leaves the dependent basis values undefined.

use std::collections::BTreeMap;

use serde::Serialize;

/// Exact-n lookup of a reference row.
pub trait LookupTable {
    /// Row type returned for a sample size.
    type Row;

    /// Row for sample size `n`, `None` when the table has no entry.
    fn lookup(&self, n: usize) -> Option<Self::Row>;
}

/// Hanson–Koopmans factors for one sample size.
///
/// The B-basis pair (r_b, k_b) and the A-basis multiplier k_a come from two
/// independent column groups, so either half may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HkRow {
    /// 1-based rank of the order statistic used for the B-basis value.
    pub rank_b: Option<usize>,
    /// B-basis exponent.
    pub k_b: Option<f64>,
    /// A-basis exponent.
    pub k_a: Option<f64>,
}

/// Weibull small-sample correction coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeibullRow {
    /// B-basis correction V_b.
    pub v_b: f64,
    /// A-basis correction V_a.
    pub v_a: f64,
}

/// In-memory table keyed by sample size.
///
/// # Examples
///
/// ```
/// use u_allowables::tables::{KeyedTable, LookupTable, WeibullRow};
///
/// let mut table = KeyedTable::new();
/// table.insert(10, WeibullRow { v_b: 3.05, v_a: 5.2 });
/// assert!(table.lookup(10).is_some());
/// assert!(table.lookup(11).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedTable<R> {
    rows: BTreeMap<usize, R>,
}

impl<R> Default for KeyedTable<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<R> KeyedTable<R> {
    /// Empty table; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the row for `n`.
    pub fn insert(&mut self, n: usize, row: R) {
        self.rows.insert(n, row);
    }

    /// `true` when a row for `n` exists.
    pub fn contains(&self, n: usize) -> bool {
        self.rows.contains_key(&n)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R> FromIterator<(usize, R)> for KeyedTable<R> {
    fn from_iter<I: IntoIterator<Item = (usize, R)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<R: Clone> LookupTable for KeyedTable<R> {
    type Row = R;

    fn lookup(&self, n: usize) -> Option<R> {
        self.rows.get(&n).cloned()
    }
}

/// Hanson–Koopmans factor table.
pub type HkTable = KeyedTable<HkRow>;

/// Weibull correction table.
pub type WeibullTable = KeyedTable<WeibullRow>;

/// Both reference tables used by a run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables<H = HkTable, W = WeibullTable> {
    /// Hanson–Koopmans factors.
    pub hk: H,
    /// Weibull corrections.
    pub weibull: W,
}
