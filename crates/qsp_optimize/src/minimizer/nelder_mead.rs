//! Nelder-Mead simplex search
//!
//! Gantree: L4_Optimize → Minimizer → NelderMead
//!
//! Derivative-free alternative to BFGS. The initial simplex perturbs each
//! coordinate of `x0` by 5% (or by a small absolute step when it is zero).
//! Converged when both the vertex spread and the function-value spread
//! around the best vertex fall below tolerance.

use super::{MinimizeOptions, MinimizeReport};
use qsp_core::optim::nelder_mead::{
    ALPHA, FATOL, GAMMA, NONZERO_DELTA, RHO, SIGMA, XATOL, ZERO_DELTA,
};
use qsp_core::QspResult;

/// Minimize `objective` from `x0` with Nelder-Mead
pub fn minimize_nelder_mead<F>(
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

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(x0.to_vec());
    for i in 0..dim {
        let mut vertex = x0.to_vec();
        vertex[i] = if vertex[i] != 0.0 {
            (1.0 + NONZERO_DELTA) * vertex[i]
        } else {
            ZERO_DELTA
        };
        simplex.push(vertex);
    }
    let mut values = Vec::with_capacity(dim + 1);
    for vertex in &simplex {
        values.push(eval(vertex)?);
    }

    let mut iterations = 0;
    let mut converged = false;
    let mut message = "maximum iterations reached";

    while iterations < options.max_iterations {
        sort_simplex(&mut simplex, &mut values);

        if spread(&simplex, &values) {
            converged = true;
            message = "simplex below tolerance";
            break;
        }

        let worst = dim;
        let centroid: Vec<f64> = (0..dim)
            .map(|j| simplex[..dim].iter().map(|v| v[j]).sum::<f64>() / dim as f64)
            .collect();
        let toward = |coef: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(&simplex[worst])
                .map(|(c, w)| c + coef * (c - w))
                .collect()
        };

        let reflected = toward(ALPHA);
        let f_reflected = eval(&reflected)?;

        if f_reflected < values[0] {
            let expanded = toward(ALPHA * GAMMA);
            let f_expanded = eval(&expanded)?;
            if f_expanded < f_reflected {
                simplex[worst] = expanded;
                values[worst] = f_expanded;
            } else {
                simplex[worst] = reflected;
                values[worst] = f_reflected;
            }
        } else if f_reflected < values[dim - 1] {
            simplex[worst] = reflected;
            values[worst] = f_reflected;
        } else {
            // Outside contraction when the reflection beat the worst vertex
            let (contracted, bound) = if f_reflected < values[worst] {
                (toward(ALPHA * RHO), f_reflected)
            } else {
                (toward(-RHO), values[worst])
            };
            let f_contracted = eval(&contracted)?;
            if f_contracted <= bound {
                simplex[worst] = contracted;
                values[worst] = f_contracted;
            } else {
                let best = simplex[0].clone();
                for k in 1..=dim {
                    for j in 0..dim {
                        simplex[k][j] = best[j] + SIGMA * (simplex[k][j] - best[j]);
                    }
                    values[k] = eval(&simplex[k])?;
                }
            }
        }

        iterations += 1;
        log::debug!("nelder-mead iter {}: best f={:.6e}", iterations, values[0]);
    }

    sort_simplex(&mut simplex, &mut values);
    Ok(MinimizeReport {
        x: simplex.swap_remove(0),
        fun: values[0],
        iterations,
        evaluations,
        converged,
        message: message.to_string(),
    })
}

/// Order vertices by objective value, best first
fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

/// Vertex and value spread both within tolerance
fn spread(simplex: &[Vec<f64>], values: &[f64]) -> bool {
    let x_spread = simplex[1..]
        .iter()
        .flat_map(|v| v.iter().zip(&simplex[0]).map(|(a, b)| (a - b).abs()))
        .fold(0.0f64, f64::max);
    let f_spread = values[1..]
        .iter()
        .map(|f| (f - values[0]).abs())
        .fold(0.0f64, f64::max);
    x_spread <= XATOL && f_spread <= FATOL
}

// ============================================================================
// Tests
// ============================================================================
