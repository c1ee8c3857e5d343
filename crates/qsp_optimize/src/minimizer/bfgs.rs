//! BFGS with finite-difference gradients
//!
//! Gantree: L4_Optimize → Minimizer → Bfgs
//!
//! Dense inverse-Hessian BFGS with an Armijo backtracking line search.
//! Gradients are forward differences with step `fd_step · max(1, |x_i|)`.
//! Terminates on `‖g‖∞ ≤ gtol` (converged), on a failed line search
//! (precision loss), or at the iteration cap.

use super::{dot, norm_inf, MinimizeOptions, MinimizeReport};
use qsp_core::{optim, QspResult};

/// Curvature below which the inverse-Hessian update is skipped
const MIN_CURVATURE: f64 = 1e-12;

/// Minimize `objective` from `x0` with BFGS
pub fn minimize_bfgs<F>(
    mut objective: F,
    x0: &[f64],
    options: &MinimizeOptions,
) -> QspResult<MinimizeReport>
where
    F: FnMut(&[f64]) -> QspResult<f64>,
{
    let dim = x0.len();
    let mut evaluations = 0usize;
    let mut eval = |x: &[f64]| -> QspResult<f64> {
        evaluations += 1;
        objective(x)
    };

    let mut x = x0.to_vec();
    let mut fx = eval(&x)?;
    let mut g = gradient(&mut eval, &x, fx, options.fd_step)?;
    let mut h = identity(dim);

    let mut iterations = 0;
    let mut converged = false;
    let mut message = "maximum iterations reached";

    while iterations < options.max_iterations {
        if norm_inf(&g) <= options.gtol {
            converged = true;
            message = "gradient below tolerance";
            break;
        }

        let mut p = mat_vec(&h, &g).iter().map(|v| -v).collect::<Vec<_>>();
        let mut slope = dot(&g, &p);
        if slope >= 0.0 {
            // Not a descent direction: fall back to steepest descent
            h = identity(dim);
            p = g.iter().map(|v| -v).collect();
            slope = -dot(&g, &g);
        }

        // Armijo backtracking
        let mut alpha = 1.0;
        let mut accepted = None;
        while alpha >= optim::MIN_STEP {
            let trial: Vec<f64> = x.iter().zip(&p).map(|(xi, pi)| xi + alpha * pi).collect();
            let f_trial = eval(&trial)?;
            if f_trial.is_finite() && f_trial <= fx + optim::ARMIJO_C1 * alpha * slope {
                accepted = Some((trial, f_trial));
                break;
            }
            alpha *= optim::BACKTRACK;
        }

        let Some((x_new, f_new)) = accepted else {
            message = "line search failed: precision loss";
            break;
        };

        let g_new = gradient(&mut eval, &x_new, f_new, options.fd_step)?;
        let s: Vec<f64> = x_new.iter().zip(&x).map(|(a, b)| a - b).collect();
        let y: Vec<f64> = g_new.iter().zip(&g).map(|(a, b)| a - b).collect();
        let ys = dot(&y, &s);
        if ys > MIN_CURVATURE {
            update_inverse_hessian(&mut h, &s, &y, ys);
        }

        x = x_new;
        fx = f_new;
        g = g_new;
        iterations += 1;

        log::debug!(
            "bfgs iter {}: f={:.6e} |g|={:.3e} step={:.3e}",
            iterations,
            fx,
            norm_inf(&g),
            alpha
        );
    }

    Ok(MinimizeReport {
        x,
        fun: fx,
        iterations,
        evaluations,
        converged,
        message: message.to_string(),
    })
}

/// Forward-difference gradient given `f(x)`
fn gradient<E>(eval: &mut E, x: &[f64], fx: f64, step: f64) -> QspResult<Vec<f64>>
where
    E: FnMut(&[f64]) -> QspResult<f64>,
{
    let mut g = Vec::with_capacity(x.len());
    let mut probe = x.to_vec();
    for i in 0..x.len() {
        let h = step * x[i].abs().max(1.0);
        probe[i] = x[i] + h;
        // Exact representable step
        let h = probe[i] - x[i];
        g.push((eval(&probe)? - fx) / h);
        probe[i] = x[i];
    }
    Ok(g)
}

fn identity(dim: usize) -> Vec<Vec<f64>> {
    (0..dim)
        .map(|i| (0..dim).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

fn mat_vec(m: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    m.iter().map(|row| dot(row, v)).collect()
}

/// `H ← (I − ρ s yᵀ) H (I − ρ y sᵀ) + ρ s sᵀ`, `ρ = 1 / yᵀs`
fn update_inverse_hessian(h: &mut [Vec<f64>], s: &[f64], y: &[f64], ys: f64) {
    let rho = 1.0 / ys;
    let hy = mat_vec(h, y);
    let yhy = dot(y, &hy);
    let dim = s.len();
    for i in 0..dim {
        for j in 0..dim {
            h[i][j] += -rho * (hy[i] * s[j] + s[i] * hy[j]) + (rho * rho * yhy + rho) * s[i] * s[j];
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qsp_core::QspError;

    fn options() -> MinimizeOptions {
        MinimizeOptions {
            gtol: 1e-5,
            fd_step: optim::FD_STEP,
            max_iterations: 500,
        }
    }

    #[test]
    fn test_quadratic_converges() {
        // f = (x-1)^2 + 10 (y+2)^2 + x y / 2
        let f = |x: &[f64]| -> QspResult<f64> {
            Ok((x[0] - 1.0).powi(2) + 10.0 * (x[1] + 2.0).powi(2) + 0.5 * x[0] * x[1])
        };
        let report = minimize_bfgs(f, &[5.0, 5.0], &options()).unwrap();
        assert!(report.converged, "{}", report);
        // Stationary point of the quadratic
        let xs = 240.0 / 159.0;
        let ys = -2.0 - xs / 40.0;
        assert_abs_diff_eq!(report.x[0], xs, epsilon = 1e-4);
        assert_abs_diff_eq!(report.x[1], ys, epsilon = 1e-4);
    }

    #[test]
    fn test_start_at_minimum() {
        let f = |x: &[f64]| -> QspResult<f64> { Ok(x.iter().map(|v| v * v).sum()) };
        let report = minimize_bfgs(f, &[0.0, 0.0, 0.0], &options()).unwrap();
        assert!(report.converged);
        assert_eq!(report.iterations, 0);
        // One base evaluation + one per coordinate
        assert_eq!(report.evaluations, 4);
    }

    #[test]
    fn test_iteration_cap_is_not_an_error() {
        let f = |x: &[f64]| -> QspResult<f64> {
            Ok((1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2))
        };
        let opts = MinimizeOptions {
            max_iterations: 2,
            ..options()
        };
        let report = minimize_bfgs(f, &[-1.2, 1.0], &opts).unwrap();
        assert!(!report.converged);
        assert_eq!(report.iterations, 2);
        assert_eq!(report.message, "maximum iterations reached");
    }

    #[test]
    fn test_error_propagates() {
        let mut calls = 0;
        let f = |x: &[f64]| -> QspResult<f64> {
            calls += 1;
            if calls > 3 {
                Err(QspError::InternalError("stop".into()))
            } else {
                Ok(x[0] * x[0])
            }
        };
        assert!(minimize_bfgs(f, &[3.0], &options()).is_err());
    }

    #[test]
    fn test_inverse_hessian_secant_condition() {
        let mut h = identity(2);
        let s = [0.3, -0.1];
        let y = [0.9, 0.2];
        let ys = dot(&y, &s);
        update_inverse_hessian(&mut h, &s, &y, ys);
        // H y = s after the update
        let hy = mat_vec(&h, &y);
        assert_abs_diff_eq!(hy[0], s[0], epsilon = 1e-12);
        assert_abs_diff_eq!(hy[1], s[1], epsilon = 1e-12);
    }
}
