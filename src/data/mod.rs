//! Data sources that need no dataset file.

pub mod synthetic;

pub use synthetic::*;
