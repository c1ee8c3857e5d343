//! Classical single-shot baseline
//!
//! Gantree: L5_Sweep → Baseline
//!
//! Success probability of one Helstrom measurement on the noisy rotation,
//! plus majority voting over repeated independent shots. These are the
//! references QSP results are compared against.

use crate::grid::GridSpec;
use crate::probability::ProbabilityGrid;
use qsp_core::{QspError, QspResult};
use std::f64::consts::{FRAC_PI_4, PI};

/// Half-width of the integration window in standard deviations
const TAIL_SIGMAS: f64 = 12.0;

/// Simpson intervals (even)
const SIMPSON_INTERVALS: usize = 4096;

/// Single-shot Helstrom success probability
///
/// Noise-free: `½ + ½·√(1 − cos²δ)`. Otherwise the measurement angle
/// `α = π/4 − δ/2` is fixed and the success probability is integrated
/// against both Gaussian hypotheses.
/// Gantree: classical_single_exact(meansep,std) -> f64 // 헬스트롬
pub fn classical_single_exact(meansep: f64, std: f64) -> QspResult<f64> {
    if !meansep.is_finite() {
        return Err(QspError::InvalidNoiseMean(meansep));
    }
    if !std.is_finite() || std < 0.0 {
        return Err(QspError::InvalidNoiseStd(std));
    }

    if std == 0.0 {
        let c = meansep.cos();
        return Ok(0.5 + 0.5 * (1.0 - c * c).sqrt());
    }

    // Each term integrated on a window around its own mean
    let alpha = FRAC_PI_4 - meansep / 2.0;
    let zero = simpson(
        |theta| gaussian_pdf(theta, 0.0, std) * (alpha + theta).cos().powi(2),
        -TAIL_SIGMAS * std,
        TAIL_SIGMAS * std,
        SIMPSON_INTERVALS,
    );
    let one = simpson(
        |theta| gaussian_pdf(theta, meansep, std) * (alpha + theta).sin().powi(2),
        meansep - TAIL_SIGMAS * std,
        meansep + TAIL_SIGMAS * std,
        SIMPSON_INTERVALS,
    );
    Ok(0.5 * zero + 0.5 * one)
}

/// Majority vote over `votes` independent shots, each correct with `p`
/// Gantree: majority_vote(p,votes) -> f64 // 다수결
pub fn majority_vote(p: f64, votes: usize) -> QspResult<f64> {
    if votes % 2 == 0 {
        return Err(QspError::InvalidConfig(format!(
            "majority vote needs an odd number of votes, got {}",
            votes
        )));
    }
    let mut total = 0.0;
    let mut binom = 1.0;
    for j in 0..=votes {
        if j > 0 {
            binom *= (votes - j + 1) as f64 / j as f64;
        }
        if 2 * j > votes {
            total += binom * p.powi(j as i32) * (1.0 - p).powi((votes - j) as i32);
        }
    }
    Ok(total)
}

/// Baseline over a grid, row-major by `y` then `x`
pub fn classical_grid(grid: &GridSpec) -> QspResult<ProbabilityGrid> {
    grid.validate()?;
    let xs = grid.xs();
    let rows = grid
        .ys()
        .iter()
        .map(|&y| {
            xs.iter()
                .map(|&x| classical_single_exact(x * PI, y * PI))
                .collect::<QspResult<Vec<f64>>>()
        })
        .collect::<QspResult<Vec<_>>>()?;
    ProbabilityGrid::new(rows)
}

fn gaussian_pdf(x: f64, mean: f64, std: f64) -> f64 {
    let z = (x - mean) / std;
    (-0.5 * z * z).exp() / (std * (2.0 * PI).sqrt())
}

/// Composite Simpson rule on `[a, b]` with `intervals` (even) panels
fn simpson<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, intervals: usize) -> f64 {
    let h = (b - a) / intervals as f64;
    let mut sum = f(a) + f(b);
    for k in 1..intervals {
        let weight = if k % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + k as f64 * h);
    }
    sum * h / 3.0
}

// ============================================================================
// Tests
// ============================================================================
