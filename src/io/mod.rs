//! File adapters around the analysis engine.
//!
//! - [`input`]: sample CSV with value and batch columns
//! - [`tables`]: Hanson–Koopmans and Weibull reference tables
//! - [`report`]: the fixed-layout result CSV

pub mod csv;
pub mod input;
pub mod report;
pub mod tables;

pub use input::{load_sample, SampleColumns};
pub use report::{completion_message, save_report};
pub use tables::{load_hk_table, load_or_empty, load_weibull_table};
