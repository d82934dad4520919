//! Two-parameter Weibull estimation.
//!
//! - [`weibull_mle`] — bracketed Newton-Raphson MLE for shape and scale
//!
//! # References
//!
//! - Abernethy, R.B. (2006). *The New Weibull Handbook*, 5th ed.
//! - Lawless (2003), *Statistical Models and Methods for Lifetime Data*, 2nd ed.

mod mle;

pub use mle::{weibull_mle, WeibullMleResult};
