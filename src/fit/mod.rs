//! Fitting orchestration.
//!
//! Responsibilities:
//!
//! - run the closed-form and gradient-descent solvers on one `(X, Y)`
//! - sweep the vocabulary size and track train/held-out error (parallel)

pub mod fitter;
pub mod sweep;

pub use fitter::*;
pub use sweep::*;
