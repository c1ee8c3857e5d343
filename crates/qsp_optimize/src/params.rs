//! QSP parameter record
//!
//! Gantree: L4_Optimize → QspParams
//!
//! Named view of the flat vector the minimizer searches:
//!
//! ```text
//! index:  0 .. n-1 | n          n+1      | n+2        n+3
//! field:  phases   | start.theta start.phi| end.theta  end.phi
//! ```

use qsp_core::{sim, Angle, QspError, QspResult, StateAngles};
use qsp_sim::QspSequence;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases plus preparation and measurement angles
/// Gantree: QspParams // 구조화된 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QspParams {
    /// Sequence phase angles (length n)
    pub phases: Vec<Angle>,

    /// Start state angles
    pub start: StateAngles,

    /// End measurement angles
    pub end: StateAngles,
}

impl QspParams {
    /// Create from parts
    pub fn new(phases: Vec<Angle>, start: StateAngles, end: StateAngles) -> Self {
        Self { phases, start, end }
    }

    /// Every entry drawn uniformly from `[0, 1)`, in packed order
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let flat: Vec<f64> = (0..sim::param_len(n)).map(|_| rng.gen::<f64>()).collect();
        Self::split(&flat, n)
    }

    /// Sequence length `n`
    #[inline]
    pub fn n(&self) -> usize {
        self.phases.len()
    }

    /// Flatten to `[phases..., start.theta, start.phi, end.theta, end.phi]`
    /// Gantree: pack(&self) -> Vec<f64> // n+4
    pub fn pack(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(sim::param_len(self.n()));
        flat.extend_from_slice(&self.phases);
        flat.extend_from_slice(&[self.start.theta, self.start.phi, self.end.theta, self.end.phi]);
        flat
    }

    /// Inverse of `pack`, checking the length is `n + 4`
    /// Gantree: unpack(&[f64],n) -> Result<Self> // 길이 검증
    pub fn unpack(flat: &[f64], n: usize) -> QspResult<Self> {
        let expected = sim::param_len(n);
        if flat.len() != expected {
            return Err(QspError::InvalidParameterLength {
                expected,
                actual: flat.len(),
            });
        }
        Ok(Self::split(flat, n))
    }

    /// Length-checked by callers
    fn split(flat: &[f64], n: usize) -> Self {
        Self {
            phases: flat[..n].to_vec(),
            start: StateAngles::new(flat[n], flat[n + 1]),
            end: StateAngles::new(flat[n + 2], flat[n + 3]),
        }
    }

    /// Build the sequence these parameters describe
    pub fn to_sequence(&self) -> QspResult<QspSequence> {
        QspSequence::from_angles(self.phases.clone(), self.start, self.end)
    }
}

impl fmt::Display for QspParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QspParams(phases={:?}, start=({:.4}, {:.4}), end=({:.4}, {:.4}))",
            self.phases, self.start.theta, self.start.phi, self.end.theta, self.end.phi
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
