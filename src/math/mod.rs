//! Weight solvers: closed-form least squares and gradient descent.

pub mod gradient;
pub mod normal;
pub mod ols;

pub use gradient::*;
pub use normal::*;
pub use ols::*;
