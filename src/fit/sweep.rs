//! Error as a function of vocabulary size.
//!
//! For each `k` we fit the closed-form solver on the metadata columns plus the
//! `k` most frequent vocabulary columns of the training split, then record the
//! training MSE and the MSE on a held-out split. Both matrices are built once
//! with the full vocabulary; a given `k` just keeps the leading `8 + k`
//! columns, since the vocabulary is ordered by frequency.
//!
//! Every `k` is independent, so they are evaluated in parallel.

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::domain::Comment;
use crate::error::{AppError, ErrorKind};
use crate::eval::score;
use crate::features::{DesignMatrix, FeatureParams, METADATA_WIDTH, Vocabulary, build_matrix, build_vocabulary};
use crate::math::solve_closed_form;

/// One point on the sweep curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Number of vocabulary columns.
    pub k: usize,
    pub train_mse: f64,
    pub eval_mse: f64,
}

#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// Training vocabulary the sweep drew its columns from.
    pub vocabulary: Vocabulary,
    /// Points sorted by `k`.
    pub points: Vec<SweepPoint>,
    /// Values of `k` whose system was singular, with the reason.
    pub skipped: Vec<(usize, String)>,
}

impl SweepOutcome {
    /// The point with the lowest held-out MSE (smallest `k` on ties).
    pub fn best(&self) -> Option<&SweepPoint> {
        let mut best: Option<&SweepPoint> = None;
        for p in &self.points {
            if best.is_none_or(|b| p.eval_mse < b.eval_mse) {
                best = Some(p);
            }
        }
        best
    }
}

/// Sweep `k = 0..=max_k` (capped at the training vocabulary size).
pub fn sweep_vocabulary(
    train: &[Comment],
    eval: &[Comment],
    max_k: usize,
    params: &FeatureParams,
) -> Result<SweepOutcome, AppError> {
    if train.is_empty() {
        return Err(AppError::invalid_config("The training split is empty."));
    }
    if eval.is_empty() {
        return Err(AppError::invalid_config("The evaluation split is empty."));
    }

    let vocabulary = build_vocabulary(train, max_k);
    let train_design = build_matrix(train, &vocabulary, params)?;
    let eval_design = build_matrix(eval, &vocabulary, params)?;

    let k_max = vocabulary.len();
    info!(
        "Sweeping k = 0..={k_max} over {} training and {} evaluation comments",
        train.len(),
        eval.len()
    );

    let results: Vec<(usize, Result<SweepPoint, AppError>)> = (0..=k_max)
        .into_par_iter()
        .map(|k| (k, evaluate_k(&train_design, &eval_design, k)))
        .collect();

    let mut points = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    let mut first_singular = None;
    for (k, result) in results {
        match result {
            Ok(point) => points.push(point),
            Err(e) if e.kind() == ErrorKind::SingularMatrix => {
                warn!("Skipping k={k}: {e}");
                skipped.push((k, e.to_string()));
                first_singular.get_or_insert(e);
            }
            Err(e) => return Err(e),
        }
    }

    // Every k singular: there is no curve to report.
    if points.is_empty() {
        if let Some(e) = first_singular {
            return Err(e);
        }
    }

    Ok(SweepOutcome {
        vocabulary,
        points,
        skipped,
    })
}

fn evaluate_k(train: &DesignMatrix, eval: &DesignMatrix, k: usize) -> Result<SweepPoint, AppError> {
    let width = METADATA_WIDTH + k;
    let train_k = train.leading_columns(width)?;
    let eval_k = eval.leading_columns(width)?;

    let weights = solve_closed_form(&train_k.x, &train_k.y)?;
    let (_, train_metrics) = score(&train_k.x, &train_k.y, &weights)?;
    let (_, eval_metrics) = score(&eval_k.x, &eval_k.y, &weights)?;

    Ok(SweepPoint {
        k,
        train_mse: train_metrics.mse,
        eval_mse: eval_metrics.mse,
    })
}
