//! Success-probability grids
//!
//! Gantree: L5_Sweep → ProbabilityGrid
//!
//! Row-major: one row per `y` (increasing), one column per `x` (increasing).
//! The text form is whitespace-separated, one row per line.

use qsp_core::{QspError, QspResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Grid of success probabilities
/// Gantree: ProbabilityGrid // 확률 격자
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityGrid {
    /// `rows[j][i]` is the value at `(xs[i], ys[j])`
    pub rows: Vec<Vec<f64>>,
}

impl ProbabilityGrid {
    /// Wrap rows, rejecting ragged input
    pub fn new(rows: Vec<Vec<f64>>) -> QspResult<Self> {
        if let Some(first) = rows.first() {
            let width = first.len();
            if let Some((j, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
                return Err(QspError::InvalidGrid(format!(
                    "row {} has {} columns, expected {}",
                    j,
                    row.len(),
                    width
                )));
            }
        }
        Ok(Self { rows })
    }

    /// `(columns, rows)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.first().map_or(0, Vec::len), self.rows.len())
    }

    /// Value at column `i`, row `j`
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.rows.get(j).and_then(|row| row.get(i)).copied()
    }

    /// Apply `f` to every cell
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|&v| f(v)).collect())
                .collect(),
        }
    }

    /// Apply a fallible `f` to every cell, stopping at the first error
    pub fn try_map<F: Fn(f64) -> QspResult<f64>>(&self, f: F) -> QspResult<Self> {
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(|&v| f(v)).collect::<QspResult<Vec<f64>>>())
            .collect::<QspResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Complement `1 − p` (success ↔ error)
    pub fn complement(&self) -> Self {
        self.map(|p| 1.0 - p)
    }

    /// Cellwise `ln(other / self)`; positive where `other` is larger
    /// Gantree: log_ratio(&self,other) -> Result<Self> // 비교
    pub fn log_ratio(&self, other: &Self) -> QspResult<Self> {
        if self.shape() != other.shape() {
            return Err(QspError::InvalidGrid(format!(
                "shape mismatch: {:?} vs {:?}",
                self.shape(),
                other.shape()
            )));
        }
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.iter().zip(b).map(|(p, q)| (q / p).ln()).collect())
            .collect();
        Ok(Self { rows })
    }

    // ========================================================================
    // Text Format
    // ========================================================================

    /// Whitespace-separated rows
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(|v| format!("{:.18e}", v)).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }

    /// Parse whitespace-separated rows; blank lines are skipped
    pub fn from_text(text: &str) -> QspResult<Self> {
        let rows = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|tok| {
                        tok.parse::<f64>().map_err(|e| {
                            QspError::InvalidGrid(format!("bad value '{}': {}", tok, e))
                        })
                    })
                    .collect::<QspResult<Vec<f64>>>()
            })
            .collect::<QspResult<Vec<_>>>()?;
        Self::new(rows)
    }

    /// Write the text form to `path`
    pub fn save_text<P: AsRef<Path>>(&self, path: P) -> QspResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text())
            .map_err(|e| QspError::FileError(format!("{}: {}", path.display(), e)))
    }

    /// Read the text form from `path`
    pub fn load_text<P: AsRef<Path>>(path: P) -> QspResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| QspError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::from_text(&content)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> ProbabilityGrid {
        ProbabilityGrid::new(vec![vec![0.5, 0.75, 1.0], vec![0.5, 0.625, 0.8]]).unwrap()
    }

    #[test]
    fn test_shape_and_get() {
        let grid = sample();
        assert_eq!(grid.shape(), (3, 2));
        assert_eq!(grid.get(1, 1), Some(0.625));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_ragged_rejected() {
        assert!(ProbabilityGrid::new(vec![vec![0.5], vec![0.5, 0.5]]).is_err());
    }

    #[test]
    fn test_text_round_trip_is_exact() {
        let grid = sample().map(|p| p / 3.0);
        let text = grid.to_text();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(ProbabilityGrid::from_text(&text).unwrap(), grid);
    }

    #[test]
    fn test_from_text_rejects_garbage() {
        assert!(ProbabilityGrid::from_text("0.5 abc\n").is_err());
    }

    #[test]
    fn test_log_ratio() {
        let a = sample();
        let b = a.map(|p| p * 2.0);
        let ratio = a.log_ratio(&b).unwrap();
        assert_abs_diff_eq!(ratio.get(2, 1).unwrap(), 2f64.ln(), epsilon = 1e-12);
        let c = ProbabilityGrid::new(vec![vec![1.0]]).unwrap();
        assert!(a.log_ratio(&c).is_err());
    }

    #[test]
    fn test_try_map_propagates_errors() {
        let doubled = sample().try_map(|p| Ok(p * 2.0)).unwrap();
        assert_eq!(doubled, sample().map(|p| p * 2.0));
        let err = sample()
            .try_map(|p| if p > 0.9 { Err(QspError::InvalidNoiseStd(p)) } else { Ok(p) })
            .unwrap_err();
        assert_eq!(err, QspError::InvalidNoiseStd(1.0));
    }

    #[test]
    fn test_complement() {
        assert_eq!(sample().complement().get(2, 0), Some(0.0));
    }
}
