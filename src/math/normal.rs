//! Normal-equation terms shared by both solvers.
//!
//! Both the closed-form and the iterative solver only need `XᵀX` (p×p) and
//! `XᵀY` (p), so we form them once per design matrix.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct NormalEquations {
    pub xtx: DMatrix<f64>,
    pub xty: DVector<f64>,
}

impl NormalEquations {
    pub fn from_design(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<Self, AppError> {
        check_rows(x, y)?;
        Ok(Self {
            xtx: x.tr_mul(x),
            xty: x.tr_mul(y),
        })
    }

    pub fn n_features(&self) -> usize {
        self.xty.len()
    }
}

/// Fail unless `X` and `Y` have the same number of rows.
pub fn check_rows(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<(), AppError> {
    if x.nrows() != y.len() {
        return Err(AppError::dimension_mismatch(format!(
            "Design matrix has {} rows but the target vector has {} entries.",
            x.nrows(),
            y.len()
        )));
    }
    if x.ncols() == 0 {
        return Err(AppError::dimension_mismatch("Design matrix has no feature columns."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn forms_gram_matrix_and_moment_vector() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);
        let eq = NormalEquations::from_design(&x, &y).unwrap();
        assert_eq!(eq.xtx, DMatrix::from_row_slice(2, 2, &[3.0, 3.0, 3.0, 5.0]));
        assert_eq!(eq.xty, DVector::from_row_slice(&[15.0, 21.0]));
        assert_eq!(eq.n_features(), 2);
    }

    #[test]
    fn row_mismatch_is_rejected() {
        let x = DMatrix::<f64>::zeros(3, 2);
        let y = DVector::<f64>::zeros(2);
        let err = NormalEquations::from_design(&x, &y).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }
}
