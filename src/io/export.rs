//! CSV exports: sweep curves and per-comment predictions.
//!
//! Both are meant to be easy to consume in spreadsheets or plotting scripts.

use std::path::Path;

use nalgebra::DVector;
use serde::Serialize;

use crate::error::AppError;
use crate::fit::SweepPoint;

#[derive(Debug, Serialize)]
struct PredictionRow {
    index: usize,
    observed: f64,
    predicted: f64,
    residual: f64,
}

/// Write `k,train_mse,eval_mse` rows. The header is written even with no rows.
pub fn write_sweep_csv(path: &Path, points: &[SweepPoint]) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create sweep CSV '{}': {e}", path.display())))?;
    writer
        .write_record(["k", "train_mse", "eval_mse"])
        .map_err(|e| AppError::io(format!("Failed to write sweep CSV header: {e}")))?;
    for point in points {
        writer
            .serialize(point)
            .map_err(|e| AppError::io(format!("Failed to write sweep CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush sweep CSV: {e}")))?;
    Ok(())
}

/// Write `index,observed,predicted,residual` rows.
pub fn write_predictions_csv(
    path: &Path,
    observed: &DVector<f64>,
    predicted: &DVector<f64>,
) -> Result<(), AppError> {
    if observed.len() != predicted.len() {
        return Err(AppError::dimension_mismatch(format!(
            "{} predictions for {} observations.",
            predicted.len(),
            observed.len()
        )));
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::io(format!("Failed to create predictions CSV '{}': {e}", path.display()))
    })?;
    for (index, (&obs, &pred)) in observed.iter().zip(predicted.iter()).enumerate() {
        writer
            .serialize(PredictionRow {
                index,
                observed: obs,
                predicted: pred,
                residual: obs - pred,
            })
            .map_err(|e| AppError::io(format!("Failed to write predictions CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush predictions CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("creg_{name}_{}.csv", std::process::id()))
    }

    #[test]
    fn sweep_csv_has_header_and_rows() {
        let path = temp_path("sweep");
        let points = vec![
            SweepPoint { k: 0, train_mse: 1.5, eval_mse: 1.75 },
            SweepPoint { k: 1, train_mse: 1.25, eval_mse: 1.5 },
        ];
        write_sweep_csv(&path, &points).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["k,train_mse,eval_mse", "0,1.5,1.75", "1,1.25,1.5"]);
    }

    #[test]
    fn sweep_csv_without_points_still_has_header() {
        let path = temp_path("sweep_empty");
        write_sweep_csv(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(text, "k,train_mse,eval_mse\n");
    }

    #[test]
    fn predictions_csv_includes_residuals() {
        let path = temp_path("pred");
        let observed = DVector::from_row_slice(&[2.0, 3.0]);
        let predicted = DVector::from_row_slice(&[1.5, 3.5]);
        write_predictions_csv(&path, &observed, &predicted).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "index,observed,predicted,residual");
        assert_eq!(lines[1], "0,2.0,1.5,0.5");
        assert_eq!(lines[2], "1,3.0,3.5,-0.5");
    }
}
