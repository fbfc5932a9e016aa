//! Read/write model JSON files.
//!
//! A model file carries everything needed to rebuild the same design matrix on
//! another split: the vocabulary (with its counts), the engineered-feature
//! constants, and the column names, alongside each solver's weights.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{SolverKind, Split};
use crate::error::AppError;
use crate::eval::ErrorMetrics;
use crate::features::{FeatureParams, Vocabulary};

/// Weights produced by one solver plus its in-sample metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverWeights {
    pub solver: SolverKind,
    pub weights: Vec<f64>,
    pub metrics: ErrorMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    /// Split the model was fitted on.
    pub split: Split,
    pub feature_params: FeatureParams,
    pub vocabulary: Vocabulary,
    pub columns: Vec<String>,
    pub solvers: Vec<SolverWeights>,
}

/// Write a model JSON file.
pub fn write_model_json(path: &Path, model: &ModelFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create model JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, model)
        .map_err(|e| AppError::io(format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

/// Read a model JSON file.
pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let model: ModelFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::io(format!("Invalid model JSON: {e}")))?;

    for solver in &model.solvers {
        if solver.weights.len() != model.columns.len() {
            return Err(AppError::dimension_mismatch(format!(
                "{} weights stored for {} columns.",
                solver.weights.len(),
                model.columns.len()
            )));
        }
    }
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{VocabEntry, column_names};

    #[test]
    fn model_file_survives_a_write_and_read() {
        let vocabulary = Vocabulary::from_entries(vec![VocabEntry {
            token: "lol".into(),
            count: 4,
        }]);
        let columns = column_names(&vocabulary);
        let model = ModelFile {
            tool: "creg".to_string(),
            generated_at: Utc::now(),
            split: Split::Train,
            feature_params: FeatureParams::default(),
            vocabulary,
            solvers: vec![SolverWeights {
                solver: SolverKind::ClosedForm,
                weights: vec![0.5; columns.len()],
                metrics: ErrorMetrics {
                    mse: 1.0,
                    rmse: 1.0,
                    mae: 0.8,
                },
            }],
            columns,
        };

        let path = std::env::temp_dir().join(format!("creg_model_{}.json", std::process::id()));
        write_model_json(&path, &model).unwrap();
        let back = read_model_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back, model);
    }

    #[test]
    fn missing_model_file_is_io_error() {
        let err = read_model_json(Path::new("/no/such/model.json")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
