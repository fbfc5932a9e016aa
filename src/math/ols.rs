//! Closed-form least squares via the normal equations.
//!
//! ```text
//! w = (XᵀX)⁻¹ XᵀY
//! ```
//!
//! Implementation choices:
//! - We never form the inverse. `XᵀX` is symmetric positive definite when `X`
//!   has full column rank, so we factor it with Cholesky and solve.
//! - Rank is checked on `X` itself rather than on `XᵀX`: squaring the
//!   condition number would push collinear designs below what double
//!   precision can tell apart from merely ill-conditioned ones.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::NormalEquations;

/// Smallest accepted ratio between the smallest and largest singular value of `X`.
pub const MIN_RECIPROCAL_CONDITION: f64 = 1e-10;

/// Solve for the least-squares weights of `(X, Y)`.
pub fn solve_closed_form(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    let equations = NormalEquations::from_design(x, y)?;
    solve_closed_form_with(x, &equations)
}

/// Same as [`solve_closed_form`] when the normal equations are already formed.
pub fn solve_closed_form_with(
    x: &DMatrix<f64>,
    equations: &NormalEquations,
) -> Result<DVector<f64>, AppError> {
    if x.ncols() != equations.n_features() {
        return Err(AppError::dimension_mismatch(format!(
            "Design matrix has {} columns but the normal equations have {}.",
            x.ncols(),
            equations.n_features()
        )));
    }
    check_full_column_rank(x)?;

    let cholesky = equations.xtx.clone().cholesky().ok_or_else(|| {
        AppError::singular_matrix("XᵀX is not positive definite; the normal equations have no unique solution.")
    })?;
    let w = cholesky.solve(&equations.xty);

    if w.iter().all(|v| v.is_finite()) {
        Ok(w)
    } else {
        Err(AppError::singular_matrix(
            "Normal-equation solve produced non-finite weights.",
        ))
    }
}

/// Fail with `SingularMatrix` when `X` is rank deficient or nearly so.
pub fn check_full_column_rank(x: &DMatrix<f64>) -> Result<(), AppError> {
    let (n, p) = x.shape();
    if p == 0 {
        return Err(AppError::dimension_mismatch("Design matrix has no feature columns."));
    }
    if n < p {
        return Err(AppError::singular_matrix(format!(
            "Only {n} examples for {p} feature columns; XᵀX is singular."
        )));
    }

    let singular_values = x.singular_values();
    let s_max = singular_values.max();
    let s_min = singular_values.min();
    if !(s_max.is_finite() && s_max > 0.0) || s_min <= s_max * MIN_RECIPROCAL_CONDITION {
        return Err(AppError::singular_matrix(format!(
            "XᵀX is singular or near-singular (singular values of X span {s_min:.3e}..{s_max:.3e})."
        )));
    }
    Ok(())
}
