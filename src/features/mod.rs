//! Feature extraction: vocabulary, column schema, design matrix.
//!
//! Responsibilities:
//!
//! - rank tokens of a split by frequency and keep the top K
//! - describe every design-matrix column by name
//! - assemble `(X, Y)` for a split

pub mod matrix;
pub mod schema;
pub mod vocabulary;

pub use matrix::*;
pub use schema::*;
pub use vocabulary::*;
