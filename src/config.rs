//! Run configuration loaded from TOML.
//!
//! Every field is optional in the file and falls back to the conventional
//! file and column names:
//!
//! ```toml
//! input = "Input.csv"
//! value_column = "DATA VALUES"
//! group_column = "DATA SET NO."
//! hk_table = "InputHK.csv"
//! weibull_table = "InputWeibull.csv"
//! output = "final_basis_results.csv"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BasisError;
use crate::io::SampleColumns;

/// Input, table and output locations for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Sample CSV.
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Header of the measurement column.
    #[serde(default = "default_value_column")]
    pub value_column: String,
    /// Header of the batch-label column.
    #[serde(default = "default_group_column")]
    pub group_column: String,
    /// Hanson–Koopmans factor table.
    #[serde(default = "default_hk_table")]
    pub hk_table: PathBuf,
    /// Weibull correction table.
    #[serde(default = "default_weibull_table")]
    pub weibull_table: PathBuf,
    /// Report CSV.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            value_column: default_value_column(),
            group_column: default_group_column(),
            hk_table: default_hk_table(),
            weibull_table: default_weibull_table(),
            output: default_output(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("Input.csv")
}
fn default_value_column() -> String {
    "DATA VALUES".to_string()
}
fn default_group_column() -> String {
    "DATA SET NO.".to_string()
}
fn default_hk_table() -> PathBuf {
    PathBuf::from("InputHK.csv")
}
fn default_weibull_table() -> PathBuf {
    PathBuf::from("InputWeibull.csv")
}
fn default_output() -> PathBuf {
    PathBuf::from("final_basis_results.csv")
}

impl AnalysisConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// [`BasisError::Config`] for malformed TOML or unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, BasisError> {
        toml::from_str(content).map_err(|e| BasisError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, BasisError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Column names for the sample loader.
    pub fn columns(&self) -> SampleColumns<'_> {
        SampleColumns {
            value: &self.value_column,
            group: &self.group_column,
        }
    }
}
