//! Local minimizers
//!
//! Gantree: L4_Optimize → Minimizer
//!
//! Unconstrained local minimization of a scalar objective. Each method runs
//! to its own convergence criteria or its internal iteration cap and always
//! reports the last point it reached; stopping without convergence is not
//! an error.

use crate::config::{Method, OptimizerConfig};
use qsp_core::{QspError, QspResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quasi-Newton BFGS
pub mod bfgs;

/// Nelder-Mead simplex
pub mod nelder_mead;

pub use bfgs::minimize_bfgs;
pub use nelder_mead::minimize_nelder_mead;

/// Minimizer settings shared by all methods
/// Gantree: MinimizeOptions // 최소화 옵션
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimizeOptions {
    /// Gradient infinity-norm tolerance (BFGS)
    pub gtol: f64,

    /// Finite-difference step (BFGS)
    pub fd_step: f64,

    /// Iteration cap
    pub max_iterations: usize,
}

impl MinimizeOptions {
    /// Options matching an optimizer configuration
    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self {
            gtol: config.gtol,
            fd_step: config.fd_step,
            max_iterations: config.iteration_cap(),
        }
    }
}

/// Outcome of a local minimization
/// Gantree: MinimizeReport // 최소화 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimizeReport {
    /// Last accepted point
    pub x: Vec<f64>,

    /// Objective value at `x`
    pub fun: f64,

    /// Iterations performed
    pub iterations: usize,

    /// Objective evaluations performed
    pub evaluations: usize,

    /// Whether the method's convergence criterion was met
    pub converged: bool,

    /// Termination reason
    pub message: String,
}

impl fmt::Display for MinimizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fun={:.6e} iters={} evals={} converged={} ({})",
            self.fun, self.iterations, self.evaluations, self.converged, self.message
        )
    }
}

/// Run `method` from `x0`
/// Gantree: minimize(method,f,x0,opts) -> MinimizeReport // 디스패치
pub fn minimize<F>(
    method: Method,
    objective: F,
    x0: &[f64],
    options: &MinimizeOptions,
) -> QspResult<MinimizeReport>
where
    F: FnMut(&[f64]) -> QspResult<f64>,
{
    if x0.is_empty() {
        return Err(QspError::InvalidConfig(
            "starting point must not be empty".to_string(),
        ));
    }
    match method {
        Method::Bfgs => minimize_bfgs(objective, x0, options),
        Method::NelderMead => minimize_nelder_mead(objective, x0, options),
    }
}

// ============================================================================
// Vector Helpers
// ============================================================================

#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
pub(crate) fn norm_inf(a: &[f64]) -> f64 {
    a.iter().fold(0.0f64, |m, v| m.max(v.abs()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rosenbrock(x: &[f64]) -> QspResult<f64> {
        Ok((1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2))
    }

    fn options() -> MinimizeOptions {
        MinimizeOptions {
            gtol: 1e-5,
            fd_step: 1.49e-8,
            max_iterations: 2000,
        }
    }

    #[test]
    fn test_dispatch_bfgs() {
        // Forward differences may stop on precision loss near the valley floor
        let report = minimize(Method::Bfgs, rosenbrock, &[-1.2, 1.0], &options()).unwrap();
        assert_abs_diff_eq!(report.x[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(report.x[1], 1.0, epsilon = 2e-3);
        assert!(report.fun < 1e-6, "{}", report);
    }

    #[test]
    fn test_dispatch_nelder_mead() {
        let report = minimize(Method::NelderMead, rosenbrock, &[-1.2, 1.0], &options()).unwrap();
        assert!(report.converged, "{}", report);
        assert_abs_diff_eq!(report.x[0], 1.0, epsilon = 1e-2);
        assert_abs_diff_eq!(report.x[1], 1.0, epsilon = 2e-2);
    }

    #[test]
    fn test_empty_start_rejected() {
        assert!(minimize(Method::Bfgs, rosenbrock, &[], &options()).is_err());
    }

    #[test]
    fn test_objective_error_propagates() {
        let failing = |_: &[f64]| -> QspResult<f64> { Err(QspError::InternalError("boom".into())) };
        assert!(minimize(Method::Bfgs, failing, &[0.0], &options()).is_err());
        assert!(minimize(Method::NelderMead, failing, &[0.0], &options()).is_err());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(dot(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
        assert_eq!(norm_inf(&[1.0, -5.0, 2.0]), 5.0);
    }
}
