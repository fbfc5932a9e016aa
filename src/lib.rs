//! `comment-regression` library crate.
//!
//! Predicts a comment's popularity score from its metadata and the most
//! frequent words of a training corpus, using a linear model fitted either in
//! closed form or by gradient descent.
//!
//! The binary (`creg`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the feature/solver code can be driven from other tools or notebooks

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod eval;
pub mod features;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;
pub mod text;
