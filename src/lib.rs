//! # u-allowables
//!
//! B-basis and A-basis material allowables from a sample of strength
//! measurements, following the CMH-17 statistical procedures.
//!
//! The engine computes every candidate method over the same sorted sample
//! and then picks one with a fixed priority chain. All numerics sit behind
//! [`backend::StatsBackend`], so the decision logic can be exercised with
//! deterministic stand-ins.
//!
//! ## Modules
//!
//! - [`tolerance`] — one-sided normal tolerance factors k(n, B) and k(n, A)
//! - [`pooling`] — pooled ANOVA basis values across batches
//! - [`estimators`] — normal, lognormal, Weibull and Hanson–Koopmans candidates
//! - [`selection`] — the method-selection rules and the run result
//! - [`analysis`] — end-to-end run over one sample
//! - [`tables`] — exact-n reference tables
//! - [`io`] — sample, table and report files
//! - [`special`], [`testing`], [`weibull`], [`stats`] — numeric building blocks
//!
//! ## Example
//!
//! ```
//! use u_allowables::{analyze, Method, ReferenceTables, Sample, SampleGroups, StatrsBackend};
//!
//! let values: Vec<f64> = (0..25).map(|i| 150.0 + ((i * 7) % 11) as f64 * 0.8).collect();
//! let sample = Sample::new(values).unwrap();
//! let tables: ReferenceTables = ReferenceTables::default();
//!
//! let result = analyze(&sample, &SampleGroups::none(), &tables, &StatrsBackend).unwrap();
//! assert!(Method::ALL.contains(&result.selected));
//! assert!(result.normal.a_basis < result.normal.b_basis);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Every candidate is reported**: selection never suppresses a method's values
//! - **Absent, not zero**: undefined basis values are `None`
//! - **Research-backed**: factors and tests follow published procedures

pub mod analysis;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod estimators;
pub mod io;
pub mod pooling;
pub mod sample;
pub mod selection;
pub mod special;
pub mod stats;
pub mod tables;
pub mod testing;
pub mod tolerance;
pub mod weibull;

#[cfg(test)]
mod test_support;

pub use analysis::analyze;
pub use backend::{StatrsBackend, StatsBackend};
pub use error::BasisError;
pub use estimators::{BasisCandidate, Method, Validity};
pub use sample::{Sample, SampleGroups, SampleSummary};
pub use selection::SelectionResult;
pub use tables::ReferenceTables;
