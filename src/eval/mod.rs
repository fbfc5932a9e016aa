//! Predictions and error metrics.

pub mod metrics;

pub use metrics::*;
