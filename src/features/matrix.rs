//! Design matrix construction.

use std::collections::HashMap;

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::domain::Comment;
use crate::error::AppError;
use crate::features::schema::{
    CommentProfile, FeatureParams, METADATA_COLUMNS, METADATA_WIDTH, column_count, column_names,
};
use crate::features::Vocabulary;
use crate::text::normalize_and_split;

/// `(X, Y)` for one split plus the column names of `X`.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    pub columns: Vec<String>,
}

impl DesignMatrix {
    pub fn n_examples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Keep only the first `width` columns (metadata plus a vocabulary prefix).
    pub fn leading_columns(&self, width: usize) -> Result<Self, AppError> {
        if width > self.n_features() {
            return Err(AppError::dimension_mismatch(format!(
                "Requested {width} columns from a matrix with {}.",
                self.n_features()
            )));
        }
        Ok(Self {
            x: self.x.columns(0, width).into_owned(),
            y: self.y.clone(),
            columns: self.columns[..width].to_vec(),
        })
    }
}

/// Build `X` (one row per comment, `8 + |vocabulary|` columns) and `Y`.
///
/// Vocabulary columns are the comment's occurrence count of the token divided
/// by the token's vocabulary count, so frequent tokens weigh less.
pub fn build_matrix(
    comments: &[Comment],
    vocabulary: &Vocabulary,
    params: &FeatureParams,
) -> Result<DesignMatrix, AppError> {
    params.validate()?;
    if let Some(entry) = vocabulary.entries().iter().find(|e| e.count == 0) {
        return Err(AppError::invalid_config(format!(
            "Vocabulary token '{}' has a zero count.",
            entry.token
        )));
    }

    let n = comments.len();
    let p = column_count(vocabulary);
    let mut x = DMatrix::<f64>::zeros(n, p);
    let mut y = DVector::<f64>::zeros(n);

    for (i, comment) in comments.iter().enumerate() {
        comment.check_finite(i)?;

        let profile = CommentProfile::new(comment);
        for (j, column) in METADATA_COLUMNS.iter().enumerate() {
            x[(i, j)] = (column.extract)(&profile, params);
        }

        let tokens = normalize_and_split(&comment.text);
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            *occurrences.entry(token.as_str()).or_insert(0) += 1;
        }
        for (k, entry) in vocabulary.entries().iter().enumerate() {
            if let Some(&count) = occurrences.get(entry.token.as_str()) {
                x[(i, METADATA_WIDTH + k)] = count as f64 / entry.count as f64;
            }
        }

        y[i] = comment.popularity_score;
    }

    debug!("Built design matrix: {n} rows x {p} columns");

    Ok(DesignMatrix {
        x,
        y,
        columns: column_names(vocabulary),
    })
}
