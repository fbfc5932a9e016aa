//! Shared pipeline logic behind the `fit`, `sweep` and `eval` commands.
//!
//! Keeping this in one place separates the workflow
//! load -> split -> vocabulary -> (X, Y) -> solvers -> metrics
//! from presentation, and lets tests drive it without spawning processes.

use std::collections::BTreeMap;

use chrono::Utc;
use log::info;
use nalgebra::DVector;

use crate::domain::{Comment, DataSource, EvalConfig, FitConfig, SolverKind, Split, SplitSizes, SweepConfig};
use crate::error::AppError;
use crate::eval::{ErrorMetrics, score};
use crate::features::{DesignMatrix, Vocabulary, build_matrix, build_vocabulary};
use crate::fit::{FitOutcome, SweepOutcome, fit_solvers, sweep_vocabulary};
use crate::io::{DatasetSplits, ModelFile, SolverWeights, load_source, partition, read_model_json};
use crate::report::word_count_histogram;

/// All computed outputs of a single `creg fit` run.
#[derive(Debug, Clone)]
pub struct FitRun {
    pub split: Split,
    pub vocabulary: Vocabulary,
    pub design: DesignMatrix,
    pub outcome: FitOutcome,
    pub histogram: Option<BTreeMap<usize, usize>>,
}

/// All computed outputs of a single `creg eval` run.
#[derive(Debug, Clone)]
pub struct EvalRun {
    pub split: Split,
    pub observed: DVector<f64>,
    pub results: Vec<EvalResult>,
}

#[derive(Debug, Clone)]
pub struct EvalResult {
    pub solver: SolverKind,
    pub predicted: DVector<f64>,
    pub metrics: ErrorMetrics,
}

/// Load the configured source and cut it into splits.
pub fn load_splits(source: &DataSource, sizes: SplitSizes) -> Result<DatasetSplits, AppError> {
    let comments = load_source(source)?;
    Ok(partition(comments, sizes))
}

/// Execute `fit` end to end.
pub fn run_fit(config: &FitConfig) -> Result<FitRun, AppError> {
    let splits = load_splits(&config.source, config.sizes)?;
    run_fit_on(splits.get(config.split), config)
}

/// Execute `fit` on already-loaded comments.
///
/// The vocabulary is built from the same comments the model is fitted on.
pub fn run_fit_on(comments: &[Comment], config: &FitConfig) -> Result<FitRun, AppError> {
    if comments.is_empty() {
        return Err(AppError::invalid_config(format!(
            "The {} is empty; check the dataset size and split sizes.",
            config.split.display_name().to_lowercase()
        )));
    }

    let vocabulary = build_vocabulary(comments, config.top_k);
    let design = build_matrix(comments, &vocabulary, &config.features)?;
    info!(
        "{}: {} examples x {} features",
        config.split.display_name(),
        design.n_examples(),
        design.n_features()
    );

    let outcome = fit_solvers(&design, &config.solvers.kinds(), &config.gradient)?;
    let histogram = config.histogram.then(|| word_count_histogram(comments));

    Ok(FitRun {
        split: config.split,
        vocabulary,
        design,
        outcome,
        histogram,
    })
}

/// Package a fit run as a model file.
pub fn model_file(run: &FitRun, config: &FitConfig) -> ModelFile {
    ModelFile {
        tool: "creg".to_string(),
        generated_at: Utc::now(),
        split: run.split,
        feature_params: config.features,
        vocabulary: run.vocabulary.clone(),
        columns: run.design.columns.clone(),
        solvers: run
            .outcome
            .runs
            .iter()
            .map(|r| SolverWeights {
                solver: r.solver,
                weights: r.weights.iter().copied().collect(),
                metrics: r.metrics,
            })
            .collect(),
    }
}

/// Execute `sweep` end to end.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepOutcome, AppError> {
    if config.eval_split == Split::Train {
        return Err(AppError::invalid_config(
            "The sweep evaluation split must differ from the training split.",
        ));
    }
    let splits = load_splits(&config.source, config.sizes)?;
    sweep_vocabulary(
        splits.get(Split::Train),
        splits.get(config.eval_split),
        config.max_k,
        &config.features,
    )
}

/// Execute `eval` end to end.
pub fn run_eval(config: &EvalConfig) -> Result<EvalRun, AppError> {
    let model = read_model_json(&config.model_path)?;
    let splits = load_splits(&config.source, config.sizes)?;
    evaluate_model(&model, splits.get(config.split), config.split)
}

/// Rebuild `(X, Y)` with the model's vocabulary and score every stored solver.
pub fn evaluate_model(model: &ModelFile, comments: &[Comment], split: Split) -> Result<EvalRun, AppError> {
    if model.solvers.is_empty() {
        return Err(AppError::invalid_config("The model file holds no solver weights."));
    }

    let design = build_matrix(comments, &model.vocabulary, &model.feature_params)?;
    if design.columns != model.columns {
        return Err(AppError::dimension_mismatch(format!(
            "Model columns ({}) do not match the rebuilt design matrix ({}).",
            model.columns.len(),
            design.columns.len()
        )));
    }

    let mut results = Vec::with_capacity(model.solvers.len());
    for stored in &model.solvers {
        let weights = DVector::from_vec(stored.weights.clone());
        let (predicted, metrics) = score(&design.x, &design.y, &weights)?;
        results.push(EvalResult {
            solver: stored.solver,
            predicted,
            metrics,
        });
    }

    Ok(EvalRun {
        split,
        observed: design.y,
        results,
    })
}
