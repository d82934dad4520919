//! Fixed-layout CSV report.
//!
//! The layout is a summary block followed by one block per method in the
//! order ANOVA, Normal, Lognormal, Hanson–Koopmans, Weibull, separated by
//! blank rows. Rounded numbers are written in their shortest form with at
//! least one decimal (`96.0`, `1.2345`); absent values are empty cells.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::csv::write_record;
use crate::error::BasisError;
use crate::estimators::{
    AnovaDetail, BasisCandidate, CandidateDetail, GoodnessOfFitDetail, HkDetail, Validity,
    WeibullDetail,
};
use crate::pooling::{ANOVA_T_A, ANOVA_T_B};
use crate::selection::SelectionResult;

/// Shortest round-trip text of `x`, keeping a trailing `.0` on integral
/// values.
///
/// # Examples
///
/// ```
/// use u_allowables::io::report::number;
///
/// assert_eq!(number(96.0), "96.0");
/// assert_eq!(number(1.93), "1.93");
/// ```
pub fn number(x: f64) -> String {
    let s = x.to_string();
    if x.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

/// `x` rounded to `dp` decimals, then rendered with [`number`].
///
/// # Examples
///
/// ```
/// use u_allowables::io::report::rounded;
///
/// assert_eq!(rounded(2.0 / 3.0, 4), "0.6667");
/// assert_eq!(rounded(100.0, 2), "100.0");
/// ```
pub fn rounded(x: f64, dp: usize) -> String {
    let r = format!("{x:.dp$}").parse::<f64>().unwrap_or(x);
    number(r)
}

fn opt(x: Option<f64>, f: impl Fn(f64) -> String) -> String {
    x.map(f).unwrap_or_default()
}

fn r2(x: Option<f64>) -> String {
    opt(x, |v| rounded(v, 2))
}

fn r4(x: Option<f64>) -> String {
    opt(x, |v| rounded(v, 4))
}

fn raw(x: Option<f64>) -> String {
    opt(x, number)
}

fn row<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn title(name: &str, width: usize) -> Vec<String> {
    let mut r = vec![name.to_string()];
    r.resize(width, String::new());
    r
}

fn pass_fail(v: Validity) -> &'static str {
    if v.passed() {
        "Pass"
    } else {
        "Fail"
    }
}

fn anova_block(c: &BasisCandidate) -> [Vec<String>; 3] {
    let detail: Option<AnovaDetail> = match c.detail {
        CandidateDetail::Anova(d) => d,
        _ => None,
    };
    let label = if c.validity.passed() {
        "Pass (Poolable)"
    } else {
        "Fail"
    };
    let (t_b, t_a) = detail.map_or((ANOVA_T_B, ANOVA_T_A), |d| (d.t_b, d.t_a));
    [
        title("ANOVA CMH-17 Analysis", 9),
        row([
            "",
            "MSB",
            "MSE",
            "S_pool",
            "Tb",
            "B_Val (ANOVA)",
            "Ta",
            "A_Val (ANOVA)",
            label,
        ]),
        vec![
            String::new(),
            r2(detail.map(|d| d.msb)),
            r2(detail.map(|d| d.mse)),
            r2(detail.map(|d| d.s_pool)),
            number(t_b),
            r2(c.b_basis),
            number(t_a),
            r2(c.a_basis),
            String::new(),
        ],
    ]
}

fn goodness_of_fit_block(c: &BasisCandidate, name: &str, prefix: &str) -> [Vec<String>; 3] {
    let detail: Option<GoodnessOfFitDetail> = match c.detail {
        CandidateDetail::GoodnessOfFit(d) => Some(d),
        _ => None,
    };
    let heading = |suffix: &str| format!("{prefix}_{suffix}");
    [
        title(name, 9),
        vec![
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            heading("Kb"),
            heading("B_Val"),
            heading("Ka"),
            heading("A_Value"),
            "AD_Stat".to_string(),
            pass_fail(c.validity).to_string(),
        ],
        vec![
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            r4(detail.map(|d| d.k_b)),
            r4(c.b_basis),
            r4(detail.map(|d| d.k_a)),
            r4(c.a_basis),
            r4(detail.and_then(|d| d.ad_statistic)),
            String::new(),
        ],
    ]
}

fn nonparametric_block(c: &BasisCandidate) -> [Vec<String>; 3] {
    let detail: Option<HkDetail> = match c.detail {
        CandidateDetail::Nonparametric(d) => Some(d),
        _ => None,
    };
    [
        title("Non Parametric (HK) Analysis", 9),
        row([
            "",
            "",
            "HK_rb",
            "HK_r",
            "HK_kb",
            "HK_B_Val",
            "HK_ka",
            "HK_A_Value",
            "",
            "",
        ]),
        vec![
            String::new(),
            String::new(),
            detail
                .and_then(|d| d.rank_b)
                .map(|r| r.to_string())
                .unwrap_or_default(),
            raw(detail.and_then(|d| d.order_statistic)),
            r4(detail.and_then(|d| d.k_b)),
            r4(c.b_basis),
            raw(detail.and_then(|d| d.k_a)),
            r4(c.a_basis),
            String::new(),
            String::new(),
        ],
    ]
}

fn weibull_block(c: &BasisCandidate) -> [Vec<String>; 3] {
    let detail: Option<WeibullDetail> = match c.detail {
        CandidateDetail::Weibull(d) => Some(d),
        _ => None,
    };
    let validity = if c.validity.passed() {
        "Pass"
    } else {
        "Fail (Shape<2)"
    };
    [
        title("Weibull Analysis", 8),
        row([
            "",
            "",
            "Shape",
            "Scale",
            "W_VB",
            "B_Val (Weibull)",
            "W_VA",
            "A_Val (Weibull)",
            "Validity",
        ]),
        vec![
            String::new(),
            String::new(),
            r4(detail.and_then(|d| d.shape)),
            r4(detail.and_then(|d| d.scale)),
            raw(detail.and_then(|d| d.v_b)),
            r4(c.b_basis),
            raw(detail.and_then(|d| d.v_a)),
            r4(c.a_basis),
            validity.to_string(),
        ],
    ]
}

/// Report rows, blank separators included as empty rows.
pub fn report_rows(result: &SelectionResult) -> Vec<Vec<String>> {
    let s = &result.summary;
    let mut rows = vec![
        row([
            "N",
            "Mean",
            "SD",
            "COV",
            "SELECTED METHOD:",
            result.selected.label(),
            "",
            "",
        ]),
        vec![
            s.n.to_string(),
            rounded(s.mean, 4),
            rounded(s.sd, 4),
            rounded(s.cov, 4),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ],
        row(["", "", "", "", "", "B-Basis", "", "A-Basis", "Validity", ""]),
    ];

    let blocks = [
        anova_block(&result.anova),
        goodness_of_fit_block(&result.normal, "Normal Analysis", "Normal"),
        goodness_of_fit_block(&result.lognormal, "Lognormal Analysis", "Log"),
        nonparametric_block(&result.nonparametric),
        weibull_block(&result.weibull),
    ];
    for block in blocks {
        rows.push(Vec::new());
        rows.extend(block);
    }
    rows
}

/// Writes the report to `out`.
pub fn write_report<W: Write>(out: &mut W, result: &SelectionResult) -> io::Result<()> {
    for r in report_rows(result) {
        write_record(out, &r)?;
    }
    out.flush()
}

/// Writes the report to `path`, replacing any existing file.
pub fn save_report(path: &Path, result: &SelectionResult) -> Result<(), BasisError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_report(&mut out, result)?;
    debug!(path = %path.display(), "report written");
    Ok(())
}

/// Completion line printed after a successful run.
pub fn completion_message(result: &SelectionResult) -> String {
    format!("Full analysis complete. Selected: {}", result.selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::Method;
    use crate::sample::SampleSummary;

    fn result() -> SelectionResult {
        SelectionResult {
            selected: Method::Normal,
            summary: SampleSummary {
                n: 20,
                mean: 100.123456,
                sd: 2.5,
                cov: 2.496918,
            },
            anova: BasisCandidate {
                method: Method::AnovaPooled,
                b_basis: None,
                a_basis: None,
                validity: Validity::Fail,
                detail: CandidateDetail::Anova(None),
            },
            normal: BasisCandidate {
                method: Method::Normal,
                b_basis: Some(95.6),
                a_basis: Some(92.4),
                validity: Validity::Pass,
                detail: CandidateDetail::GoodnessOfFit(GoodnessOfFitDetail {
                    k_b: 1.92603,
                    k_a: 3.29453,
                    ad_statistic: Some(0.21),
                    ad_critical: Some(0.73),
                }),
            },
            lognormal: BasisCandidate {
                method: Method::Lognormal,
                b_basis: Some(95.4),
                a_basis: Some(92.1),
                validity: Validity::Fail,
                detail: CandidateDetail::GoodnessOfFit(GoodnessOfFitDetail {
                    k_b: 1.92603,
                    k_a: 3.29453,
                    ad_statistic: None,
                    ad_critical: None,
                }),
            },
            weibull: BasisCandidate {
                method: Method::Weibull,
                b_basis: None,
                a_basis: None,
                validity: Validity::Fail,
                detail: CandidateDetail::Weibull(WeibullDetail {
                    shape: Some(1.5),
                    scale: Some(101.0),
                    v_b: None,
                    v_a: None,
                }),
            },
            nonparametric: BasisCandidate {
                method: Method::Nonparametric,
                b_basis: Some(93.5),
                a_basis: None,
                validity: Validity::NotApplicable,
                detail: CandidateDetail::Nonparametric(HkDetail {
                    rank_b: Some(10),
                    order_statistic: Some(100.0),
                    k_b: Some(1.0),
                    k_a: None,
                }),
            },
        }
    }

    #[test]
    fn test_number_format() {
        assert_eq!(number(96.0), "96.0");
        assert_eq!(number(-0.0), "-0.0");
        assert_eq!(number(0.5), "0.5");
        assert_eq!(rounded(1.23456, 4), "1.2346");
        assert_eq!(rounded(1.5, 4), "1.5");
    }

    #[test]
    fn test_layout() {
        let rows = report_rows(&result());
        assert_eq!(rows.len(), 23);
        assert_eq!(rows[0][4], "SELECTED METHOD:");
        assert_eq!(rows[0][5], "Normal");
        assert_eq!(rows[1], vec!["20", "100.1235", "2.5", "2.4969", "", "", "", ""]);
        for blank in [3, 7, 11, 15, 19] {
            assert!(rows[blank].is_empty());
        }
        assert_eq!(rows[4][0], "ANOVA CMH-17 Analysis");
        assert_eq!(rows[8][0], "Normal Analysis");
        assert_eq!(rows[12][0], "Lognormal Analysis");
        assert_eq!(rows[16][0], "Non Parametric (HK) Analysis");
        assert_eq!(rows[20][0], "Weibull Analysis");
        assert_eq!(rows[20].len(), 8);
    }

    #[test]
    fn test_anova_not_applicable_row() {
        let rows = report_rows(&result());
        assert_eq!(rows[5][8], "Fail");
        assert_eq!(rows[6], vec!["", "", "", "", "1.93", "", "3.3", "", ""]);
    }

    #[test]
    fn test_method_rows() {
        let rows = report_rows(&result());
        assert_eq!(rows[9][4], "Normal_Kb");
        assert_eq!(rows[9][9], "Pass");
        assert_eq!(rows[10][4..9], ["1.926", "95.6", "3.2945", "92.4", "0.21"]);
        assert_eq!(rows[13][4], "Log_Kb");
        assert_eq!(rows[13][9], "Fail");
        assert_eq!(rows[14][8], "");
        assert_eq!(rows[18][2..8], ["10", "100.0", "1.0", "93.5", "", ""]);
        assert_eq!(rows[22][2..9], ["1.5", "101.0", "", "", "", "", "Fail (Shape<2)"]);
    }

    #[test]
    fn test_write_and_message() {
        let mut out = Vec::new();
        write_report(&mut out, &result()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("N,Mean,SD,COV,SELECTED METHOD:,Normal,,\r\n"));
        assert!(text.contains("\r\n\r\nWeibull Analysis,,,,,,,\r\n"));
        assert_eq!(
            completion_message(&result()),
            "Full analysis complete. Selected: Normal"
        );
    }
}
