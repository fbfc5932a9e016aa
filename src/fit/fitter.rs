//! Run the requested solvers on one design matrix.
//!
//! Given `(X, Y)` we:
//! - form `XᵀX` / `XᵀY` once
//! - run each solver independently, timing it
//! - score each weight vector on the same `(X, Y)`
//!
//! A solver that fails numerically (singular system, no convergence) does not
//! stop the others; it is recorded as a failure next to the successful runs.

use std::time::{Duration, Instant};

use log::{info, warn};
use nalgebra::DVector;

use crate::domain::SolverKind;
use crate::error::{AppError, ErrorKind};
use crate::eval::{ErrorMetrics, score};
use crate::features::DesignMatrix;
use crate::math::{GradientDescentParams, NormalEquations, solve_closed_form_with, solve_iterative_with};

/// One successful solver run.
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub solver: SolverKind,
    pub weights: DVector<f64>,
    pub predicted: DVector<f64>,
    pub metrics: ErrorMetrics,
    pub runtime: Duration,
    /// Gradient descent only.
    pub iterations: Option<usize>,
    /// Gradient descent only: norm of the final update.
    pub step_norm: Option<f64>,
}

/// Successful runs and numerical failures, in solver order.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub runs: Vec<SolverRun>,
    pub failures: Vec<(SolverKind, AppError)>,
}

impl FitOutcome {
    pub fn run(&self, solver: SolverKind) -> Option<&SolverRun> {
        self.runs.iter().find(|r| r.solver == solver)
    }
}

/// Fit every solver in `solvers` on `design`.
///
/// Returns an error if the inputs are inconsistent, or if every solver failed
/// (the first failure is returned).
pub fn fit_solvers(
    design: &DesignMatrix,
    solvers: &[SolverKind],
    gradient: &GradientDescentParams,
) -> Result<FitOutcome, AppError> {
    if solvers.is_empty() {
        return Err(AppError::invalid_config("No solvers selected."));
    }
    if solvers.contains(&SolverKind::GradientDescent) {
        gradient.validate()?;
    }

    let equations = NormalEquations::from_design(&design.x, &design.y)?;

    let mut runs = Vec::new();
    let mut failures = Vec::new();

    for &solver in solvers {
        let start = Instant::now();
        let solved = match solver {
            SolverKind::ClosedForm => {
                solve_closed_form_with(&design.x, &equations).map(|w| (w, None, None))
            }
            SolverKind::GradientDescent => solve_iterative_with(&equations, gradient)
                .map(|s| (s.weights, Some(s.iterations), Some(s.step_norm))),
        };
        let runtime = start.elapsed();

        match solved {
            Ok((weights, iterations, step_norm)) => {
                let (predicted, metrics) = score(&design.x, &design.y, &weights)?;
                info!(
                    "{} finished in {:.3}s: MSE={:.6}",
                    solver.display_name(),
                    runtime.as_secs_f64(),
                    metrics.mse
                );
                runs.push(SolverRun {
                    solver,
                    weights,
                    predicted,
                    metrics,
                    runtime,
                    iterations,
                    step_norm,
                });
            }
            Err(e) if is_numerical(e.kind()) => {
                warn!("{} failed: {e}", solver.display_name());
                failures.push((solver, e));
            }
            Err(e) => return Err(e),
        }
    }

    if runs.is_empty() && !failures.is_empty() {
        return Err(failures.swap_remove(0).1);
    }

    Ok(FitOutcome { runs, failures })
}

fn is_numerical(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::SingularMatrix | ErrorKind::NonConvergence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_comments;
    use crate::features::{FeatureParams, build_matrix, build_vocabulary};
    use nalgebra::DMatrix;

    fn design(x: DMatrix<f64>, y: DVector<f64>) -> DesignMatrix {
        let columns = (0..x.ncols()).map(|j| format!("c{j}")).collect();
        DesignMatrix { x, y, columns }
    }

    fn stable_params() -> GradientDescentParams {
        GradientDescentParams {
            learning_rate: 0.05,
            epsilon: 1e-12,
            max_iterations: 100_000,
        }
    }

    #[test]
    fn both_solvers_agree_on_a_small_problem() {
        let d = design(
            DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]),
            DVector::from_row_slice(&[1.0, 3.0, 5.0, 7.0]),
        );
        let outcome = fit_solvers(
            &d,
            &[SolverKind::ClosedForm, SolverKind::GradientDescent],
            &stable_params(),
        )
        .unwrap();

        assert!(outcome.failures.is_empty());
        let cf = outcome.run(SolverKind::ClosedForm).unwrap();
        let gd = outcome.run(SolverKind::GradientDescent).unwrap();
        assert!(cf.iterations.is_none());
        assert!(gd.iterations.unwrap() > 0);
        assert!(cf.metrics.mse < 1e-18);
        assert!(gd.metrics.mse < 1e-12);
        for (a, b) in cf.weights.iter().zip(gd.weights.iter()) {
            assert!((a - b).abs() < 1e-8);
        }
    }

    #[test]
    fn singular_closed_form_does_not_stop_gradient_descent() {
        // Columns 0 and 1 identical.
        let d = design(
            DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
            DVector::from_row_slice(&[2.0, 2.0, 2.0]),
        );
        let outcome = fit_solvers(
            &d,
            &[SolverKind::ClosedForm, SolverKind::GradientDescent],
            &stable_params(),
        )
        .unwrap();

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, SolverKind::ClosedForm);
        assert_eq!(outcome.failures[0].1.kind(), ErrorKind::SingularMatrix);
        let gd = outcome.run(SolverKind::GradientDescent).unwrap();
        assert!(gd.metrics.mse < 1e-12);
    }

    #[test]
    fn all_solvers_failing_returns_the_error() {
        let d = design(
            DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
            DVector::from_row_slice(&[2.0, 2.0, 2.0]),
        );
        let err = fit_solvers(&d, &[SolverKind::ClosedForm], &stable_params()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SingularMatrix);
    }

    #[test]
    fn single_successful_solver_has_no_failures() {
        let d = design(
            DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]),
            DVector::from_row_slice(&[2.0, 5.0, 8.0]),
        );
        let outcome = fit_solvers(&d, &[SolverKind::ClosedForm], &stable_params()).unwrap();
        assert_eq!(outcome.runs.len(), 1);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn closed_form_recovers_signal_on_synthetic_comments() {
        let comments = generate_comments(800, 11).unwrap();
        let vocab = build_vocabulary(&comments, 20);
        let d = build_matrix(&comments, &vocab, &FeatureParams::default()).unwrap();
        let outcome = fit_solvers(&d, &[SolverKind::ClosedForm], &stable_params()).unwrap();
        let cf = outcome.run(SolverKind::ClosedForm).unwrap();
        // Noise sigma is 0.3, so in-sample MSE should sit near 0.09.
        assert!(cf.metrics.mse < 0.2, "mse={}", cf.metrics.mse);
        assert_eq!(cf.weights.len(), d.n_features());
    }
}
