//! Comment text tokenization.

pub mod tokenize;

pub use tokenize::*;
