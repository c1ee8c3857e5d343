//! QSP operation sequence
//!
//! Gantree: L3_Sim → QspSequence
//!
//! `n` phase angles plus a start ket and an end bra. Each step applies the
//! noisy signal rotation followed by the phase rotation:
//! `state ← Rz(phase_i) · Rx(noise_i) · state`.

use qsp_core::{rotation_x, rotation_z, Angle, Bra, Ket, QspError, QspResult, StateAngles};
use serde::{Deserialize, Serialize};

/// Phase sequence with preparation and measurement
/// Gantree: QspSequence // 위상 시퀀스
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QspSequence {
    phases: Vec<Angle>,
    start: Ket,
    end: Bra,
}

impl QspSequence {
    /// Create a sequence, checking `n == phases.len()`
    pub fn new(n: usize, phases: Vec<Angle>, start: Ket, end: Bra) -> QspResult<Self> {
        if n != phases.len() {
            return Err(QspError::SequenceLengthMismatch {
                expected: n,
                actual: phases.len(),
            });
        }
        if n == 0 {
            return Err(QspError::EmptySequence);
        }
        Ok(Self { phases, start, end })
    }

    /// Create from phases and angle pairs
    pub fn from_angles(phases: Vec<Angle>, start: StateAngles, end: StateAngles) -> QspResult<Self> {
        let n = phases.len();
        Self::new(n, phases, start.ket(), end.bra())
    }

    /// Sequence length `n`
    #[inline]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false for a validated sequence
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phase angles
    pub fn phases(&self) -> &[Angle] {
        &self.phases
    }

    /// Prepared start state
    pub fn start(&self) -> &Ket {
        &self.start
    }

    /// End measurement
    pub fn end(&self) -> &Bra {
        &self.end
    }

    /// Evolve the start state, pulling one noise angle per step
    ///
    /// Stops early if `noise` runs dry; callers supply at least `n` angles.
    pub fn evolve<I>(&self, noise: I) -> Ket
    where
        I: IntoIterator<Item = Angle>,
    {
        self.phases
            .iter()
            .zip(noise)
            .fold(self.start, |state, (&phase, x)| {
                rotation_z(phase) * rotation_x(x) * state
            })
    }

    /// Probability that the end measurement reports "0"
    #[inline]
    pub fn p_zero(&self, state: &Ket) -> f64 {
        self.end.probability(state)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_length_mismatch() {
        let err = QspSequence::new(3, vec![0.0, 0.0], Ket::zero(), Bra::zero()).unwrap_err();
        assert_eq!(
            err,
            QspError::SequenceLengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(
            QspSequence::new(0, vec![], Ket::zero(), Bra::zero()).unwrap_err(),
            QspError::EmptySequence
        );
    }

    #[test]
    fn test_identity_evolution() {
        let seq = QspSequence::new(3, vec![0.0; 3], Ket::zero(), Bra::zero()).unwrap();
        let state = seq.evolve(vec![0.0; 3]);
        assert_eq!(seq.p_zero(&state), 1.0);
    }

    #[test]
    fn test_single_flip() {
        let seq = QspSequence::new(1, vec![0.3], Ket::zero(), Bra::zero()).unwrap();
        let state = seq.evolve([FRAC_PI_2]);
        assert_abs_diff_eq!(seq.p_zero(&state), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_two_half_flips_return() {
        // Rx(pi/4) twice = Rx(pi/2) when the phase between them is zero
        let seq = QspSequence::new(2, vec![0.0, 0.0], Ket::zero(), Bra::zero()).unwrap();
        let state = seq.evolve([FRAC_PI_2 / 2.0, FRAC_PI_2 / 2.0]);
        assert_abs_diff_eq!(seq.p_zero(&state), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_from_angles() {
        let seq = QspSequence::from_angles(
            vec![0.1, 0.2],
            StateAngles::new(0.0, 0.0),
            StateAngles::new(0.0, 0.0),
        )
        .unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(*seq.start(), Ket::zero());
    }
}
