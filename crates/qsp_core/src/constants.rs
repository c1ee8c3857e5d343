//! Constants for QSPD
//!
//! Gantree: L0_Foundation → Constants
//!
//! Simulation defaults, minimizer tolerances, and sweep grid bounds.

// ============================================================================
// Simulation Constants
// Gantree: sim // 시뮬레이션 상수
// ============================================================================

pub mod sim {
    //! Monte Carlo estimator defaults

    /// Trials per estimate when the caller does not choose
    /// Gantree: DEFAULT_NUM_TRIALS: usize = 100
    pub const DEFAULT_NUM_TRIALS: usize = 100;

    /// Trials for the final high-precision evaluation of a sweep point
    /// Gantree: FINAL_NUM_TRIALS: usize = 10000
    pub const FINAL_NUM_TRIALS: usize = 10_000;

    /// Exclusive upper bound for per-run objective seeds
    pub const SEED_UPPER_BOUND: u64 = 1_000_000;

    /// Number of preparation + measurement angles appended to the phases
    pub const STATE_ANGLE_COUNT: usize = 4;

    /// Length of the packed parameter vector for a sequence of length `n`
    #[inline]
    pub const fn param_len(n: usize) -> usize {
        n + STATE_ANGLE_COUNT
    }
}

// ============================================================================
// Optimizer Constants
// Gantree: optim // 최적화 상수
// ============================================================================

pub mod optim {
    //! Local minimizer tolerances

    /// Gradient infinity-norm tolerance for BFGS
    pub const GTOL: f64 = 1e-5;

    /// Forward-difference step, sqrt of f64 machine epsilon
    pub const FD_STEP: f64 = 1.490_116_119_384_765_6e-8;

    /// Internal iteration cap per parameter
    pub const MAX_ITER_PER_PARAM: usize = 200;

    /// Armijo sufficient-decrease constant
    pub const ARMIJO_C1: f64 = 1e-4;

    /// Backtracking shrink factor
    pub const BACKTRACK: f64 = 0.5;

    /// Smallest line-search step before giving up
    pub const MIN_STEP: f64 = 1e-12;

    /// Nelder-Mead coefficients
    pub mod nelder_mead {
        /// Reflection
        pub const ALPHA: f64 = 1.0;
        /// Expansion
        pub const GAMMA: f64 = 2.0;
        /// Contraction
        pub const RHO: f64 = 0.5;
        /// Shrink
        pub const SIGMA: f64 = 0.5;
        /// Relative initial simplex offset
        pub const NONZERO_DELTA: f64 = 0.05;
        /// Offset for zero coordinates
        pub const ZERO_DELTA: f64 = 0.00025;
        /// Absolute tolerance on vertex spread
        pub const XATOL: f64 = 1e-4;
        /// Absolute tolerance on function-value spread
        pub const FATOL: f64 = 1e-4;
    }

    /// Effective iteration cap for a problem of dimension `dim`
    #[inline]
    pub const fn max_iterations(dim: usize) -> usize {
        MAX_ITER_PER_PARAM * dim
    }
}

// ============================================================================
// Grid Constants
// Gantree: grid // 그리드 상수
// ============================================================================

pub mod grid {
    //! Sweep grid over (separation/π, std/π)

    /// Lower axis bound (inclusive)
    pub const AXIS_MIN: f64 = 0.0;

    /// Upper axis bound (exclusive)
    pub const AXIS_MAX: f64 = 0.5001;

    /// Step for the full angle sweep
    pub const SWEEP_STEP: f64 = 0.001;

    /// Step for coarse plots
    pub const PLOT_STEP: f64 = 0.01;

    /// Largest number of points allowed on one axis
    pub const MAX_AXIS_POINTS: usize = 1_000_000;

    /// Decimal places used for grid keys
    pub const KEY_DECIMALS: i32 = 3;

    /// Round a grid coordinate to `KEY_DECIMALS` places
    #[inline]
    pub fn round_key(value: f64) -> f64 {
        let scale = 10f64.powi(KEY_DECIMALS);
        (value * scale).round() / scale
    }

    /// Integer key (thousandths) for a grid coordinate
    #[inline]
    pub fn milli_key(value: f64) -> i64 {
        (value * 10f64.powi(KEY_DECIMALS)).round() as i64
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_len() {
        assert_eq!(sim::param_len(1), 5);
        assert_eq!(sim::param_len(3), 7);
    }

    #[test]
    fn test_max_iterations() {
        assert_eq!(optim::max_iterations(5), 1000);
    }

    #[test]
    fn test_round_key() {
        assert_eq!(grid::round_key(0.123_456), 0.123);
        assert_eq!(grid::round_key(0.000_499_999), 0.0);
        assert_eq!(grid::milli_key(0.25), 250);
        // Accumulated float steps land on the same key
        let x = (0..7).fold(0.0, |acc, _| acc + 0.1);
        assert_eq!(grid::milli_key(x), 700);
    }
}
