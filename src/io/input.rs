//! Sample loading from a headed CSV file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use super::csv::split_record;
use crate::error::BasisError;
use crate::sample::{Sample, SampleGroups};

/// Cell contents treated as a missing value.
pub const MISSING_MARKERS: [&str; 10] = [
    "", "NA", "N/A", "NaN", "nan", "-nan", "NULL", "null", "#N/A", "<NA>",
];

pub(crate) fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

/// Column names used to locate the measurements and their batches.
#[derive(Debug, Clone, Copy)]
pub struct SampleColumns<'a> {
    /// Required measurement column.
    pub value: &'a str,
    /// Optional batch-label column.
    pub group: &'a str,
}

/// Loads the sample and its batch partition from `path`.
///
/// # Errors
///
/// See [`parse_sample`]; additionally [`BasisError::Io`] when the file
/// cannot be read.
pub fn load_sample(
    path: &Path,
    columns: SampleColumns<'_>,
) -> Result<(Sample, SampleGroups), BasisError> {
    let file = File::open(path)?;
    let (sample, groups) = parse_sample(BufReader::new(file), columns)?;
    debug!(path = %path.display(), n = sample.len(), groups = groups.len(), "sample loaded");
    Ok((sample, groups))
}

/// Parses a headed CSV stream into a sample and its batch partition.
///
/// Rows whose value cell is missing (see [`MISSING_MARKERS`]) are dropped.
/// A row with a value but no batch label joins the sample but no batch.
/// The group column itself is optional.
///
/// # Errors
///
/// - [`BasisError::MissingColumn`] when the header lacks the value column
/// - [`BasisError::Parse`] for a value cell that is not a number
/// - [`BasisError::InvalidSampleSize`] when no value survives
/// - [`BasisError::NonFiniteValue`] for `inf`-like cells
pub fn parse_sample<R: BufRead>(
    reader: R,
    columns: SampleColumns<'_>,
) -> Result<(Sample, SampleGroups), BasisError> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break split_record(line.trim_start_matches('\u{feff}'));
                }
            }
            None => {
                return Err(BasisError::MissingColumn {
                    column: columns.value.to_string(),
                })
            }
        }
    };

    let value_idx = header
        .iter()
        .position(|h| h == columns.value)
        .ok_or_else(|| BasisError::MissingColumn {
            column: columns.value.to_string(),
        })?;
    let group_idx = header.iter().position(|h| h == columns.group);
    if group_idx.is_none() {
        debug!(column = columns.group, "no group column; pooling disabled");
    }

    let mut values = Vec::new();
    let mut pairs = Vec::new();
    let mut ungrouped = 0usize;

    for (line_num, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(&line);

        let cell = fields.get(value_idx).map(String::as_str).unwrap_or("");
        if is_missing(cell) {
            continue;
        }
        let value: f64 = cell.parse().map_err(|_| BasisError::Parse {
            line: line_num + 1,
            message: format!("'{cell}' in column '{}' is not a number", columns.value),
        })?;
        values.push(value);

        match group_idx.and_then(|i| fields.get(i)).map(String::as_str) {
            Some(label) if !is_missing(label) => pairs.push((label.to_string(), value)),
            _ if group_idx.is_some() => ungrouped += 1,
            _ => {}
        }
    }

    if ungrouped > 0 {
        warn!(rows = ungrouped, "rows without a group label excluded from pooling");
    }

    let sample = Sample::new(values)?;
    Ok((sample, SampleGroups::from_pairs(pairs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const COLUMNS: SampleColumns<'static> = SampleColumns {
        value: "DATA VALUES",
        group: "DATA SET NO.",
    };

    fn parse(text: &str) -> Result<(Sample, SampleGroups), BasisError> {
        parse_sample(Cursor::new(text), COLUMNS)
    }

    #[test]
    fn test_values_and_groups() {
        let (sample, groups) = parse(
            "DATA SET NO.,DATA VALUES,NOTE\n\
             1,101.5,a\n\
             1,99.0,\n\
             2,103.25,b\n",
        )
        .unwrap();
        assert_eq!(sample.values(), &[99.0, 101.5, 103.25]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.slices(), vec![&[101.5, 99.0][..], &[103.25][..]]);
    }

    #[test]
    fn test_missing_values_dropped() {
        let (sample, _) = parse(
            "DATA SET NO.,DATA VALUES\n\
             1,100\n\
             1,\n\
             1,NaN\n\
             2,NA\n\
             \n\
             2,102\n",
        )
        .unwrap();
        assert_eq!(sample.values(), &[100.0, 102.0]);
    }

    #[test]
    fn test_row_without_group_joins_sample_only() {
        let (sample, groups) = parse(
            "DATA SET NO.,DATA VALUES\n\
             1,100\n\
             ,101\n\
             2,102\n",
        )
        .unwrap();
        assert_eq!(sample.len(), 3);
        assert_eq!(groups.slices(), vec![&[100.0][..], &[102.0][..]]);
    }

    #[test]
    fn test_group_column_optional() {
        let (sample, groups) = parse("DATA VALUES\n1\n2\n3\n").unwrap();
        assert_eq!(sample.len(), 3);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_quoted_header() {
        let (sample, _) = parse("\"DATA VALUES\",\"DATA SET NO.\"\n\"5.5\",A\n6,B\n").unwrap();
        assert_eq!(sample.values(), &[5.5, 6.0]);
    }

    #[test]
    fn test_missing_value_column() {
        let err = parse("VALUE\n1\n2\n").unwrap_err();
        assert!(matches!(err, BasisError::MissingColumn { column } if column == "DATA VALUES"));
        assert!(matches!(parse(""), Err(BasisError::MissingColumn { .. })));
    }

    #[test]
    fn test_non_numeric_value_is_fatal() {
        let err = parse("DATA VALUES\n1\nabc\n").unwrap_err();
        assert!(matches!(err, BasisError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_all_missing_is_empty_sample() {
        let err = parse("DATA VALUES\nNaN\n\n").unwrap_err();
        assert!(matches!(err, BasisError::InvalidSampleSize { n: 0 }));
    }

    #[test]
    fn test_load_sample_missing_file() {
        let err = load_sample(Path::new("/nonexistent/Input.csv"), COLUMNS).unwrap_err();
        assert!(matches!(err, BasisError::Io(_)));
    }
}
