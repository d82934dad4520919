//! CLI argument parsing for u-allowables

use std::path::PathBuf;

use clap::Parser;

use crate::config::AnalysisConfig;
use crate::error::BasisError;

#[derive(Parser, Debug)]
#[command(name = "u-allowables")]
#[command(version)]
#[command(
    about = "B-basis and A-basis material allowables from test data",
    long_about = None
)]
pub struct Cli {
    /// TOML file with run settings; flags below override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sample CSV [default: Input.csv]
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Header of the measurement column [default: "DATA VALUES"]
    #[arg(long, value_name = "NAME")]
    pub value_column: Option<String>,

    /// Header of the batch column [default: "DATA SET NO."]
    #[arg(long, value_name = "NAME")]
    pub group_column: Option<String>,

    /// Hanson-Koopmans factor table [default: InputHK.csv]
    #[arg(long, value_name = "FILE")]
    pub hk_table: Option<PathBuf>,

    /// Weibull correction table [default: InputWeibull.csv]
    #[arg(long, value_name = "FILE")]
    pub weibull_table: Option<PathBuf>,

    /// Report CSV [default: final_basis_results.csv]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also print the full result as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Log intermediate statistics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings from `--config` (or defaults) with flag overrides applied.
    pub fn resolve_config(&self) -> Result<AnalysisConfig, BasisError> {
        let mut cfg = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(input) = &self.input {
            cfg.input = input.clone();
        }
        if let Some(column) = &self.value_column {
            cfg.value_column = column.clone();
        }
        if let Some(column) = &self.group_column {
            cfg.group_column = column.clone();
        }
        if let Some(path) = &self.hk_table {
            cfg.hk_table = path.clone();
        }
        if let Some(path) = &self.weibull_table {
            cfg.weibull_table = path.clone();
        }
        if let Some(output) = &self.output {
            cfg.output = output.clone();
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["u-allowables"]);
        assert!(!cli.json);
        assert!(!cli.verbose);
        assert_eq!(cli.resolve_config().unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let cli = Cli::parse_from([
            "u-allowables",
            "-i",
            "panel.csv",
            "--value-column",
            "Strength",
            "--output",
            "out.csv",
            "--json",
        ]);
        let cfg = cli.resolve_config().unwrap();
        assert_eq!(cfg.input, PathBuf::from("panel.csv"));
        assert_eq!(cfg.value_column, "Strength");
        assert_eq!(cfg.group_column, "DATA SET NO.");
        assert_eq!(cfg.output, PathBuf::from("out.csv"));
        assert!(cli.json);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::parse_from(["u-allowables", "--config", "/nonexistent/run.toml"]);
        assert!(matches!(cli.resolve_config(), Err(BasisError::Io(_))));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
