//! Reference-table loaders.
//!
//! Both files have a header row and are read positionally; header names are
//! ignored. Cells that are empty or not numeric count as absent.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use super::csv::split_record;
use super::input::is_missing;
use crate::error::BasisError;
use crate::tables::{HkRow, HkTable, KeyedTable, WeibullRow, WeibullTable};

/// HK column holding n for the B-basis group.
pub const HK_COL_N_B: usize = 0;
/// HK column holding r_b.
pub const HK_COL_RANK_B: usize = 1;
/// HK column holding k_b.
pub const HK_COL_K_B: usize = 2;
/// HK column holding n for the A-basis group.
pub const HK_COL_N_A: usize = 4;
/// HK column holding k_a.
pub const HK_COL_K_A: usize = 5;

fn number(fields: &[String], idx: usize) -> Option<f64> {
    fields
        .get(idx)
        .filter(|c| !is_missing(c))
        .and_then(|c| c.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Integral, non-negative cells such as `12` or `12.0`.
fn count(fields: &[String], idx: usize) -> Option<usize> {
    number(fields, idx)
        .filter(|v| *v >= 0.0 && v.fract() == 0.0)
        .map(|v| v as usize)
}

fn data_rows<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Vec<String>, BasisError>> {
    reader
        .lines()
        .skip(1)
        .filter(|l| l.as_ref().map_or(true, |s| !s.trim().is_empty()))
        .map(|l| l.map(|s| split_record(&s)).map_err(BasisError::from))
}

/// Parses the Hanson–Koopmans table.
///
/// The B-basis columns (n, r_b, k_b) and the A-basis columns (n, k_a) are
/// independent; each n takes the first row that mentions it in the
/// respective group.
pub fn parse_hk_table<R: BufRead>(reader: R) -> Result<HkTable, BasisError> {
    let mut rows: BTreeMap<usize, HkRow> = BTreeMap::new();
    let mut seen_b = Vec::new();
    let mut seen_a = Vec::new();

    for fields in data_rows(reader) {
        let fields = fields?;

        if let Some(n) = count(&fields, HK_COL_N_B) {
            if !seen_b.contains(&n) {
                seen_b.push(n);
                let row = rows.entry(n).or_default();
                row.rank_b = count(&fields, HK_COL_RANK_B);
                row.k_b = number(&fields, HK_COL_K_B);
            }
        }

        if let Some(n) = count(&fields, HK_COL_N_A) {
            if !seen_a.contains(&n) {
                seen_a.push(n);
                rows.entry(n).or_default().k_a = number(&fields, HK_COL_K_A);
            }
        }
    }

    Ok(rows.into_iter().collect())
}

/// Parses the Weibull correction table (n, V_b, V_a).
///
/// Rows with a missing coefficient are skipped, so their n has no entry.
pub fn parse_weibull_table<R: BufRead>(reader: R) -> Result<WeibullTable, BasisError> {
    let mut table = WeibullTable::new();
    for fields in data_rows(reader) {
        let fields = fields?;
        let Some(n) = count(&fields, 0) else { continue };
        if table.contains(n) {
            continue;
        }
        match (number(&fields, 1), number(&fields, 2)) {
            (Some(v_b), Some(v_a)) => table.insert(n, WeibullRow { v_b, v_a }),
            _ => debug!(n, "Weibull row with missing coefficient skipped"),
        }
    }
    Ok(table)
}

/// Loads the Hanson–Koopmans table from `path`.
pub fn load_hk_table(path: &Path) -> Result<HkTable, BasisError> {
    parse_hk_table(BufReader::new(File::open(path)?))
}

/// Loads the Weibull correction table from `path`.
pub fn load_weibull_table(path: &Path) -> Result<WeibullTable, BasisError> {
    parse_weibull_table(BufReader::new(File::open(path)?))
}

/// Runs `loader`, degrading any failure to an empty table.
///
/// A missing or unreadable table leaves the dependent basis values
/// undefined but never aborts a run.
pub fn load_or_empty<R, F>(path: &Path, loader: F) -> KeyedTable<R>
where
    F: FnOnce(&Path) -> Result<KeyedTable<R>, BasisError>,
{
    match loader(path) {
        Ok(table) => {
            debug!(path = %path.display(), rows = table.len(), "reference table loaded");
            table
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "reference table unavailable; using empty table");
            KeyedTable::new()
        }
    }
}
