//! Fixed-step gradient descent on the least-squares objective.
//!
//! Starting from `w = 0`, each iteration applies
//!
//! ```text
//! w ← w − α (XᵀX w − XᵀY)
//! ```
//!
//! and stops once `‖w_new − w_old‖₂ ≤ ε`. The step is stable only when
//! `α < 2 / λ_max(XᵀX)`; past that the iterates blow up, which we report as
//! `NonConvergence` as soon as the step norm stops being finite. The iteration
//! cap turns a merely slow run into the same error instead of an endless loop.

use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::math::NormalEquations;

/// Hyperparameters for [`solve_iterative`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientDescentParams {
    /// Step size `α`.
    pub learning_rate: f64,
    /// Convergence threshold on the update norm.
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for GradientDescentParams {
    fn default() -> Self {
        Self {
            learning_rate: 1e-6,
            epsilon: 1e-5,
            max_iterations: 5_000_000,
        }
    }
}

impl GradientDescentParams {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(AppError::invalid_config(format!(
                "Learning rate must be finite and > 0 (got {}).",
                self.learning_rate
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(AppError::invalid_config(format!(
                "Epsilon must be finite and > 0 (got {}).",
                self.epsilon
            )));
        }
        if self.max_iterations == 0 {
            return Err(AppError::invalid_config("Max iterations must be >= 1."));
        }
        Ok(())
    }
}

/// Converged weights plus how we got there.
#[derive(Debug, Clone)]
pub struct IterativeSolution {
    pub weights: DVector<f64>,
    pub iterations: usize,
    /// Norm of the last update.
    pub step_norm: f64,
}

/// Run gradient descent on `(X, Y)`.
pub fn solve_iterative(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    params: &GradientDescentParams,
) -> Result<IterativeSolution, AppError> {
    let equations = NormalEquations::from_design(x, y)?;
    solve_iterative_with(&equations, params)
}

/// Same as [`solve_iterative`] when the normal equations are already formed.
pub fn solve_iterative_with(
    equations: &NormalEquations,
    params: &GradientDescentParams,
) -> Result<IterativeSolution, AppError> {
    params.validate()?;

    let p = equations.n_features();
    let mut weights = DVector::<f64>::zeros(p);
    let mut gradient = DVector::<f64>::zeros(p);
    let mut step_norm = f64::INFINITY;

    for iteration in 1..=params.max_iterations {
        // gradient = XᵀX w − XᵀY
        gradient.copy_from(&equations.xty);
        gradient.gemv(1.0, &equations.xtx, &weights, -1.0);

        step_norm = params.learning_rate * gradient.norm();
        if !step_norm.is_finite() {
            return Err(AppError::non_convergence(format!(
                "Gradient descent diverged after {iteration} iterations (learning rate {} is too large).",
                params.learning_rate
            )));
        }

        weights.axpy(-params.learning_rate, &gradient, 1.0);

        if step_norm <= params.epsilon {
            info!("Gradient descent converged after {iteration} iterations (step norm {step_norm:.3e})");
            return Ok(IterativeSolution {
                weights,
                iterations: iteration,
                step_norm,
            });
        }

        if iteration % 10_000 == 0 {
            debug!("Gradient descent iteration {iteration}: step norm {step_norm:.3e}");
        }
    }

    Err(AppError::non_convergence(format!(
        "Gradient descent did not converge within {} iterations (last step norm {step_norm:.3e}, epsilon {:.3e}).",
        params.max_iterations, params.epsilon
    )))
}
