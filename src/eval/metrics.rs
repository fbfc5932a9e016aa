//! Prediction and regression error metrics.
//!
//! RMSE is the standard `sqrt(mean((ŷ − y)²))`. Averaging per-example
//! `sqrt((ŷ − y)²)` instead would just be MAE again.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// MSE, RMSE and MAE of one prediction vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
}

/// Row-wise dot product of `x` with `weights`.
pub fn predict(x: &DMatrix<f64>, weights: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    if x.ncols() != weights.len() {
        return Err(AppError::dimension_mismatch(format!(
            "Weight vector has {} entries but the design matrix has {} columns.",
            weights.len(),
            x.ncols()
        )));
    }
    Ok(x * weights)
}

/// Compare `predicted` against `observed`.
pub fn evaluate(predicted: &DVector<f64>, observed: &DVector<f64>) -> Result<ErrorMetrics, AppError> {
    if predicted.len() != observed.len() {
        return Err(AppError::dimension_mismatch(format!(
            "{} predictions for {} observations.",
            predicted.len(),
            observed.len()
        )));
    }
    if observed.is_empty() {
        return Err(AppError::malformed_input("Cannot evaluate an empty split."));
    }

    let n = observed.len() as f64;
    let diff = predicted - observed;
    let mse = diff.norm_squared() / n;
    let mae = diff.iter().map(|d| d.abs()).sum::<f64>() / n;

    Ok(ErrorMetrics {
        mse,
        rmse: mse.sqrt(),
        mae,
    })
}

/// [`predict`] followed by [`evaluate`].
pub fn score(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    weights: &DVector<f64>,
) -> Result<(DVector<f64>, ErrorMetrics), AppError> {
    let predicted = predict(x, weights)?;
    let metrics = evaluate(&predicted, y)?;
    Ok((predicted, metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn predict_is_row_dot_product() {
        let x = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 0.0, -1.0, 4.0]);
        let w = DVector::from_row_slice(&[1.0, 0.5, 2.0]);
        let y = predict(&x, &w).unwrap();
        assert_eq!(y.as_slice(), &[8.0, 7.5]);
    }

    #[test]
    fn predict_rejects_wrong_weight_length() {
        let x = DMatrix::<f64>::zeros(2, 3);
        let w = DVector::<f64>::zeros(2);
        assert_eq!(predict(&x, &w).unwrap_err().kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn perfect_predictions_have_zero_error() {
        let y = DVector::from_row_slice(&[1.5, -2.0, 3.25]);
        let m = evaluate(&y, &y).unwrap();
        assert_eq!(m, ErrorMetrics { mse: 0.0, rmse: 0.0, mae: 0.0 });
    }

    #[test]
    fn single_example_error() {
        let d = -3.0;
        let predicted = DVector::from_row_slice(&[10.0 + d]);
        let observed = DVector::from_row_slice(&[10.0]);
        let m = evaluate(&predicted, &observed).unwrap();
        assert!((m.mse - d * d).abs() < 1e-12);
        assert!((m.mae - d.abs()).abs() < 1e-12);
        assert!((m.rmse - d.abs()).abs() < 1e-12);
    }

    #[test]
    fn rmse_is_root_of_mean_square() {
        // diffs 1 and 3: MSE 5, RMSE sqrt(5), MAE 2
        let predicted = DVector::from_row_slice(&[1.0, 3.0]);
        let observed = DVector::from_row_slice(&[0.0, 0.0]);
        let m = evaluate(&predicted, &observed).unwrap();
        assert!((m.mse - 5.0).abs() < 1e-12);
        assert!((m.rmse - 5.0_f64.sqrt()).abs() < 1e-12);
        assert!((m.mae - 2.0).abs() < 1e-12);
    }

    #[test]
    fn length_mismatch_and_empty_are_errors() {
        let a = DVector::from_row_slice(&[1.0, 2.0]);
        let b = DVector::from_row_slice(&[1.0]);
        assert_eq!(evaluate(&a, &b).unwrap_err().kind(), ErrorKind::DimensionMismatch);

        let empty = DVector::<f64>::zeros(0);
        assert!(evaluate(&empty, &empty).is_err());
    }
}
