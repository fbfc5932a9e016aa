//! Input/output helpers.
//!
//! - dataset JSON loading + split partitioning (`dataset`)
//! - model JSON read/write (`model`)
//! - CSV exports (`export`)

pub mod dataset;
pub mod export;
pub mod model;

pub use dataset::*;
pub use export::*;
pub use model::*;
