//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input records (`RawComment` as deserialized, `Comment` once validated)
//! - dataset split identifiers and sizes (`Split`, `SplitSizes`)
//! - run configuration for each command (`FitConfig`, `SweepConfig`, `EvalConfig`)

pub mod types;

pub use types::*;
