//! Command-line parsing for the comment popularity regressor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! feature/solver code. Parsed arguments are turned into plain config structs
//! by `app` before anything else runs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{SolverChoice, Split};
use crate::features::DEFAULT_TOP_K;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "creg", version, about = "Linear regression of comment popularity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build (X, Y) for a split, fit both solvers, and print error metrics.
    Fit(FitArgs),
    /// Fit on the training split with 0..=K vocabulary columns and report train/held-out MSE.
    Sweep(SweepArgs),
    /// Evaluate a previously exported model on a split.
    Eval(EvalArgs),
}

/// Where comments come from and how they are split.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Dataset JSON (array of comment objects).
    #[arg(long, env = "CREG_DATA", value_name = "JSON")]
    pub data: Option<PathBuf>,

    /// Use N seeded synthetic comments instead of a dataset file.
    #[arg(long, value_name = "N")]
    pub synthetic: Option<usize>,

    /// Seed for `--synthetic`.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of leading comments in the training split.
    #[arg(long, default_value_t = 10_000)]
    pub train_size: usize,

    /// Number of comments in the validation split (after training).
    #[arg(long, default_value_t = 1_000)]
    pub validation_size: usize,

    /// Number of comments in the test split (after validation).
    #[arg(long, default_value_t = 1_000)]
    pub test_size: usize,
}

/// Engineered-feature constants.
#[derive(Debug, Args, Clone)]
pub struct FeatureArgs {
    /// Divisor applied to children².
    #[arg(long, default_value_t = 30.0)]
    pub reply_divisor: f64,

    /// Divisor applied to the repeated-word count.
    #[arg(long, default_value_t = 243.0)]
    pub repeat_divisor: f64,

    /// Constant added to controversiality².
    #[arg(long, default_value_t = 0.001)]
    pub controversiality_offset: f64,
}

/// Options for `creg fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Split to build (X, Y) from.
    #[arg(long, value_enum, default_value_t = Split::Test)]
    pub split: Split,

    /// Vocabulary size.
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Which solver(s) to run.
    #[arg(long, value_enum, default_value_t = SolverChoice::Both)]
    pub solver: SolverChoice,

    /// Gradient descent step size.
    #[arg(long, default_value_t = 1e-6)]
    pub learning_rate: f64,

    /// Gradient descent stops once the update norm is at most this.
    #[arg(long, default_value_t = 1e-5)]
    pub epsilon: f64,

    /// Gradient descent iteration cap.
    #[arg(long, default_value_t = 5_000_000)]
    pub max_iterations: usize,

    /// Show the N largest-magnitude weights per solver.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Print how many comments have each word count.
    #[arg(long)]
    pub histogram: bool,

    /// Export vocabulary, feature constants and weights to JSON.
    #[arg(long = "export-model", value_name = "JSON")]
    pub export_model: Option<PathBuf>,
}

/// Options for `creg sweep`.
#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Held-out split to measure against.
    #[arg(long, value_enum, default_value_t = Split::Test)]
    pub eval_split: Split,

    /// Largest number of vocabulary columns.
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub max_k: usize,

    /// Export the curve to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// Options for `creg eval`.
#[derive(Debug, Parser, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Model JSON produced by `creg fit --export-model`.
    #[arg(long, value_name = "JSON")]
    pub model: PathBuf,

    /// Split to evaluate on.
    #[arg(long, value_enum, default_value_t = Split::Validation)]
    pub split: Split,

    /// Export per-comment predictions to CSV (first solver in the model).
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}
