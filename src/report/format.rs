//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the solver/feature code stays free of presentation concerns
//! - output changes are localized

use std::collections::BTreeMap;

use crate::domain::{SolverKind, Split};
use crate::eval::ErrorMetrics;
use crate::features::DesignMatrix;
use crate::fit::{FitOutcome, SweepOutcome};
use crate::math::GradientDescentParams;
use crate::report::rank_weights;

/// Format the `fit` summary: dataset shape, per-solver diagnostics and errors.
pub fn format_fit_report(
    split: Split,
    design: &DesignMatrix,
    outcome: &FitOutcome,
    gradient: &GradientDescentParams,
    top_n: usize,
) -> String {
    let mut out = String::new();

    out.push_str("=== creg - Comment Popularity Regression ===\n");
    out.push_str(&format!("Split: {}\n", split.display_name()));
    out.push_str(&format!(
        "Examples: {} | Features: {} ({} vocabulary)\n",
        design.n_examples(),
        design.n_features(),
        design
            .n_features()
            .saturating_sub(crate::features::METADATA_WIDTH)
    ));

    for run in &outcome.runs {
        out.push_str(&format!("\n{} Error Evaluation\n", run.solver.display_name()));
        out.push_str(&format!("runtime: {:.3}s\n", run.runtime.as_secs_f64()));
        if run.solver == SolverKind::GradientDescent {
            out.push_str(&format!(
                "epsilon = {:e} | learning rate = {:e}\n",
                gradient.epsilon, gradient.learning_rate
            ));
            if let (Some(iterations), Some(step_norm)) = (run.iterations, run.step_norm) {
                out.push_str(&format!("iterations = {iterations} | final step norm = {step_norm:.3e}\n"));
            }
        }
        out.push_str(&format_metrics(&run.metrics));

        if top_n > 0 {
            out.push_str("largest weights:\n");
            for ranked in rank_weights(&design.columns, run.weights.as_slice(), top_n) {
                out.push_str(&format!("  {:<28} {:>14.6}\n", truncate(&ranked.column, 28), ranked.weight));
            }
        }
    }

    for (solver, err) in &outcome.failures {
        out.push_str(&format!("\n{} failed: {err}\n", solver.display_name()));
    }

    out
}

/// Format MSE / RMSE / MAE, one per line.
pub fn format_metrics(metrics: &ErrorMetrics) -> String {
    format!(
        "MSE  = {:.6}\nRMSE = {:.6}\nMAE  = {:.6}\n",
        metrics.mse, metrics.rmse, metrics.mae
    )
}

/// Format the `eval` summary.
pub fn format_eval_report(split: Split, n_examples: usize, results: &[(SolverKind, ErrorMetrics)]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Split: {} ({n_examples} examples)\n", split.display_name()));
    for (solver, metrics) in results {
        out.push_str(&format!("\n{}\n", solver.display_name()));
        out.push_str(&format_metrics(metrics));
    }
    out
}

/// Format the sweep as a `k / train MSE / eval MSE` table.
pub fn format_sweep_table(outcome: &SweepOutcome, eval_split: Split) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Number of text features vs MSE (held out: {})\n",
        eval_split.display_name()
    ));
    out.push_str(&format!("{:>5} {:>14} {:>14}\n", "k", "train_mse", "eval_mse"));
    out.push_str(&format!("{:->5} {:->14} {:->14}\n", "", "", ""));

    let best_k = outcome.best().map(|p| p.k);
    for p in &outcome.points {
        let marker = if Some(p.k) == best_k { " *" } else { "" };
        out.push_str(&format!("{:>5} {:>14.6} {:>14.6}{marker}\n", p.k, p.train_mse, p.eval_mse));
    }
    for (k, reason) in &outcome.skipped {
        out.push_str(&format!("  (skipped k={k}) {reason}\n"));
    }
    out
}

/// Format a word-count histogram.
pub fn format_histogram(histogram: &BTreeMap<usize, usize>) -> String {
    let mut out = String::new();
    for (words, comments) in histogram {
        out.push_str(&format!("Number of comments with {words} words: {comments}\n"));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
