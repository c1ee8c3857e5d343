//! Sweep grid
//!
//! Gantree: L5_Sweep → GridSpec
//!
//! Axes are in units of π: `x` is the mean separation, `y` the noise std.
//! Both ranges are half-open and coordinates are rounded to three decimals.

use qsp_core::{grid, QspError, QspResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rectangular grid over (separation/π, std/π)
/// Gantree: GridSpec // 격자 정의
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// First separation coordinate
    pub xmin: f64,
    /// Separation bound (exclusive)
    pub xmax: f64,
    /// Separation step
    pub dx: f64,
    /// First std coordinate
    pub ymin: f64,
    /// Std bound (exclusive)
    pub ymax: f64,
    /// Std step
    pub dy: f64,
}

impl GridSpec {
    /// Square grid over `[AXIS_MIN, AXIS_MAX)` with one step on both axes
    pub fn square(step: f64) -> Self {
        Self {
            xmin: grid::AXIS_MIN,
            xmax: grid::AXIS_MAX,
            dx: step,
            ymin: grid::AXIS_MIN,
            ymax: grid::AXIS_MAX,
            dy: step,
        }
    }

    /// Fine grid used for the full angle sweep (501 × 501)
    pub fn default_sweep() -> Self {
        Self::square(grid::SWEEP_STEP)
    }

    /// Coarse grid used for plots (51 × 51)
    pub fn default_plot() -> Self {
        Self::square(grid::PLOT_STEP)
    }

    /// Separation coordinates
    pub fn xs(&self) -> Vec<f64> {
        axis(self.xmin, self.xmax, self.dx)
    }

    /// Std coordinates
    pub fn ys(&self) -> Vec<f64> {
        axis(self.ymin, self.ymax, self.dy)
    }

    /// `(columns, rows)`
    pub fn shape(&self) -> (usize, usize) {
        (self.xs().len(), self.ys().len())
    }

    /// Validate grid bounds and steps
    pub fn validate(&self) -> QspResult<()> {
        for (name, lo, hi, step) in [
            ("x", self.xmin, self.xmax, self.dx),
            ("y", self.ymin, self.ymax, self.dy),
        ] {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(QspError::InvalidGrid(format!("{} bounds must be finite", name)));
            }
            if !step.is_finite() || step <= 0.0 {
                return Err(QspError::InvalidGrid(format!(
                    "{} step must be > 0, got {}",
                    name, step
                )));
            }
            if hi <= lo {
                return Err(QspError::InvalidGrid(format!(
                    "{} range [{}, {}) is empty",
                    name, lo, hi
                )));
            }
            let points = ((hi - lo) / step).ceil();
            if !points.is_finite() || points > grid::MAX_AXIS_POINTS as f64 {
                return Err(QspError::InvalidGrid(format!(
                    "{} step {} gives more than {} points",
                    name,
                    step,
                    grid::MAX_AXIS_POINTS
                )));
            }
        }
        Ok(())
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::default_plot()
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x∈[{}, {}) step {}, y∈[{}, {}) step {}",
            self.xmin, self.xmax, self.dx, self.ymin, self.ymax, self.dy
        )
    }
}

/// `lo, lo + step, ...` strictly below `hi`, rounded to grid precision
fn axis(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 || hi <= lo {
        return Vec::new();
    }
    let count = ((hi - lo) / step).ceil();
    if !count.is_finite() || count > grid::MAX_AXIS_POINTS as f64 {
        return Vec::new();
    }
    (0..count as usize)
        .map(|i| lo + i as f64 * step)
        .filter(|&v| v < hi)
        .map(grid::round_key)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
