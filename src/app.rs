//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging
//! - parses CLI arguments
//! - runs the fit / sweep / eval pipelines
//! - prints reports
//! - writes optional exports

use clap::Parser;
use log::info;

use crate::cli::{Command, EvalArgs, FeatureArgs, FitArgs, SourceArgs, SweepArgs};
use crate::domain::{DataSource, EvalConfig, FitConfig, SolverKind, SplitSizes, SweepConfig};
use crate::error::AppError;
use crate::features::FeatureParams;
use crate::math::GradientDescentParams;

pub mod pipeline;

/// Entry point for the `creg` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Eval(args) => handle_eval(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    if let Some(histogram) = &run.histogram {
        println!("{}", crate::report::format_histogram(histogram));
    }
    println!(
        "{}",
        crate::report::format_fit_report(run.split, &run.design, &run.outcome, &config.gradient, config.top_n)
    );

    if let Some(path) = &config.export_model {
        crate::io::write_model_json(path, &pipeline::model_file(&run, &config))?;
        info!("Wrote model to {}", path.display());
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = sweep_config_from_args(&args)?;
    let outcome = pipeline::run_sweep(&config)?;

    println!("{}", crate::report::format_sweep_table(&outcome, config.eval_split));

    if let Some(path) = &config.export {
        crate::io::write_sweep_csv(path, &outcome.points)?;
        info!("Wrote sweep curve to {}", path.display());
    }

    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let config = eval_config_from_args(&args)?;
    let run = pipeline::run_eval(&config)?;

    let summary: Vec<(SolverKind, _)> = run.results.iter().map(|r| (r.solver, r.metrics)).collect();
    println!(
        "{}",
        crate::report::format_eval_report(run.split, run.observed.len(), &summary)
    );

    if let Some(path) = &config.export {
        if let Some(first) = run.results.first() {
            crate::io::write_predictions_csv(path, &run.observed, &first.predicted)?;
            info!(
                "Wrote {} predictions to {}",
                first.solver.display_name(),
                path.display()
            );
        }
    }

    Ok(())
}

/// `--synthetic` wins over `--data` / `CREG_DATA`.
pub fn source_from_args(args: &SourceArgs) -> Result<DataSource, AppError> {
    if let Some(count) = args.synthetic {
        return Ok(DataSource::Synthetic {
            count,
            seed: args.seed,
        });
    }
    match &args.data {
        Some(path) => Ok(DataSource::Json(path.clone())),
        None => Err(AppError::invalid_config(
            "Provide --data <JSON> (or CREG_DATA) or --synthetic <N>.",
        )),
    }
}

pub fn sizes_from_args(args: &SourceArgs) -> SplitSizes {
    SplitSizes {
        train: args.train_size,
        validation: args.validation_size,
        test: args.test_size,
    }
}

pub fn feature_params_from_args(args: &FeatureArgs) -> Result<FeatureParams, AppError> {
    let params = FeatureParams {
        controversiality_offset: args.controversiality_offset,
        reply_squared_divisor: args.reply_divisor,
        repeated_word_divisor: args.repeat_divisor,
    };
    params.validate()?;
    Ok(params)
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    let gradient = GradientDescentParams {
        learning_rate: args.learning_rate,
        epsilon: args.epsilon,
        max_iterations: args.max_iterations,
    };
    gradient.validate()?;

    Ok(FitConfig {
        source: source_from_args(&args.source)?,
        sizes: sizes_from_args(&args.source),
        split: args.split,
        top_k: args.top_k,
        features: feature_params_from_args(&args.features)?,
        gradient,
        solvers: args.solver,
        top_n: args.top,
        histogram: args.histogram,
        export_model: args.export_model.clone(),
    })
}

pub fn sweep_config_from_args(args: &SweepArgs) -> Result<SweepConfig, AppError> {
    Ok(SweepConfig {
        source: source_from_args(&args.source)?,
        sizes: sizes_from_args(&args.source),
        eval_split: args.eval_split,
        max_k: args.max_k,
        features: feature_params_from_args(&args.features)?,
        export: args.export.clone(),
    })
}

pub fn eval_config_from_args(args: &EvalArgs) -> Result<EvalConfig, AppError> {
    Ok(EvalConfig {
        source: source_from_args(&args.source)?,
        sizes: sizes_from_args(&args.source),
        split: args.split,
        model_path: args.model.clone(),
        export: args.export.clone(),
    })
}
