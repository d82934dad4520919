// Command-line runs over files in a scratch directory

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HK_TABLE: &str = "\
n,r,k_b,,n,k_a
12,6,1.05,,12,4.3
";

const WEIBULL_TABLE: &str = "\
n,V_b,V_a
12,3.2,5.6
";

fn write_inputs(dir: &Path) {
    let mut input = String::from("DATA SET NO.,DATA VALUES\n");
    let values = [
        148.2, 151.0, 149.6, 150.4, 152.3, 147.9, 150.1, 149.2, 151.7, 150.6, 148.8, 150.0,
    ];
    for (i, v) in values.iter().enumerate() {
        input.push_str(&format!("{},{}\n", i / 4 + 1, v));
    }
    // missing measurement is dropped
    input.push_str("3,\n");
    fs::write(dir.join("Input.csv"), input).unwrap();
    fs::write(dir.join("InputHK.csv"), HK_TABLE).unwrap();
    fs::write(dir.join("InputWeibull.csv"), WEIBULL_TABLE).unwrap();
}

#[test]
fn test_default_files_in_working_directory() {
    let tmp_dir = TempDir::new().unwrap();
    write_inputs(tmp_dir.path());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("u-allowables");
    cmd.current_dir(tmp_dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Full analysis complete. Selected: ",
        ));

    let report = fs::read_to_string(tmp_dir.path().join("final_basis_results.csv")).unwrap();
    let lines: Vec<&str> = report.split("\r\n").collect();
    assert!(lines[0].starts_with("N,Mean,SD,COV,SELECTED METHOD:,"));
    assert!(lines[1].starts_with("12,"));
    assert_eq!(lines[2], ",,,,,B-Basis,,A-Basis,Validity,");
    assert!(report.contains("ANOVA CMH-17 Analysis"));
    assert!(report.contains(",,HK_rb,HK_r,HK_kb,HK_B_Val,HK_ka,HK_A_Value,,"));
    assert!(report.contains(",,Shape,Scale,W_VB,B_Val (Weibull),W_VA,A_Val (Weibull),Validity"));
}

#[test]
fn test_explicit_paths_and_json() {
    let tmp_dir = TempDir::new().unwrap();
    write_inputs(tmp_dir.path());
    let out = tmp_dir.path().join("out.csv");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("u-allowables");
    cmd.arg("--input")
        .arg(tmp_dir.path().join("Input.csv"))
        .arg("--hk-table")
        .arg(tmp_dir.path().join("InputHK.csv"))
        .arg("--weibull-table")
        .arg(tmp_dir.path().join("InputWeibull.csv"))
        .arg("--output")
        .arg(&out)
        .arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"selected\""))
        .stdout(predicate::str::contains("\"nonparametric\""))
        .stdout(predicate::str::contains("Full analysis complete. Selected: "));
    assert!(out.exists());
}

#[test]
fn test_config_file_with_custom_column() {
    let tmp_dir = TempDir::new().unwrap();
    fs::write(
        tmp_dir.path().join("panel.csv"),
        "Strength\n101.2\n99.8\n100.4\n98.9\n100.9\n99.5\n",
    )
    .unwrap();
    fs::write(
        tmp_dir.path().join("run.toml"),
        "input = \"panel.csv\"\nvalue_column = \"Strength\"\noutput = \"panel_results.csv\"\n",
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("u-allowables");
    cmd.current_dir(tmp_dir.path()).arg("--config").arg("run.toml");
    cmd.assert().success();

    let report = fs::read_to_string(tmp_dir.path().join("panel_results.csv")).unwrap();
    assert!(report.starts_with("N,Mean,SD,COV,SELECTED METHOD:,"));
}

#[test]
fn test_missing_tables_still_complete() {
    let tmp_dir = TempDir::new().unwrap();
    write_inputs(tmp_dir.path());
    fs::remove_file(tmp_dir.path().join("InputHK.csv")).unwrap();
    fs::remove_file(tmp_dir.path().join("InputWeibull.csv")).unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("u-allowables");
    cmd.current_dir(tmp_dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("reference table unavailable"));
}

#[test]
fn test_missing_input_fails_without_report() {
    let tmp_dir = TempDir::new().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("u-allowables");
    cmd.current_dir(tmp_dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error loading data"));
    assert!(!tmp_dir.path().join("final_basis_results.csv").exists());
}

#[test]
fn test_missing_value_column_fails() {
    let tmp_dir = TempDir::new().unwrap();
    fs::write(tmp_dir.path().join("Input.csv"), "VALUES\n1\n2\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("u-allowables");
    cmd.current_dir(tmp_dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATA VALUES"));
}

#[test]
fn test_single_observation_fails() {
    let tmp_dir = TempDir::new().unwrap();
    fs::write(tmp_dir.path().join("Input.csv"), "DATA VALUES\n100\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("u-allowables");
    cmd.current_dir(tmp_dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 observations"));
}
