//! Monte Carlo success estimator
//!
//! Gantree: L3_Sim → SuccessEstimator
//!
//! Per trial, one noise path is drawn under each hypothesis. Under
//! hypothesis 0 the end measurement should report "0", under hypothesis 1
//! it should report "1". The estimate averages both correct-report
//! probabilities over all trials:
//!
//! ```text
//! success = (Σ |<end|ψ₀>|² + Σ (1 − |<end|ψ₁>|²)) / (2 · trials)
//! ```
//!
//! The two branches use independent draws; no common random numbers are
//! shared between them.

use crate::sequence::QspSequence;
use qsp_core::{sim, Angle, Bra, Ket, QspError, QspResult};
use qsp_noise::{Hypothesis, HypothesisPair};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-hypothesis averages behind a success estimate
/// Gantree: EstimateBreakdown // 가설별 정답 확률
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    /// Mean probability of reporting "0" under hypothesis 0
    pub p_correct_zero: f64,

    /// Mean probability of reporting "1" under hypothesis 1
    pub p_correct_one: f64,

    /// Overall success probability (mean of the two)
    pub success: f64,

    /// Trials used
    pub trials: usize,
}

impl EstimateBreakdown {
    /// Error probability `1 − success`
    pub fn error(&self) -> f64 {
        1.0 - self.success
    }
}

impl fmt::Display for EstimateBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "success={:.4} (H0={:.4}, H1={:.4}, trials={})",
            self.success, self.p_correct_zero, self.p_correct_one, self.trials
        )
    }
}

/// Monte Carlo estimator for one (separation, noise) point
/// Gantree: SuccessEstimator // 몬테카를로 추정기
#[derive(Debug, Clone, Copy)]
pub struct SuccessEstimator {
    hypotheses: HypothesisPair,
    num_trials: usize,
}

impl SuccessEstimator {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create with `DEFAULT_NUM_TRIALS` trials
    pub fn new(meansep: f64, std: f64) -> QspResult<Self> {
        Ok(Self {
            hypotheses: HypothesisPair::new(meansep, std)?,
            num_trials: sim::DEFAULT_NUM_TRIALS,
        })
    }

    /// Set the trial count
    pub fn with_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    /// Trial count
    #[inline]
    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    /// Noise hypotheses
    pub fn hypotheses(&self) -> &HypothesisPair {
        &self.hypotheses
    }

    // ========================================================================
    // Estimation
    // ========================================================================

    /// Estimated success probability
    /// Gantree: estimate(&seq,rng) -> f64 // 성공 확률
    pub fn estimate<R: Rng + ?Sized>(&self, sequence: &QspSequence, rng: &mut R) -> QspResult<f64> {
        Ok(self.estimate_detailed(sequence, rng)?.success)
    }

    /// Estimated success probability with the per-hypothesis split
    pub fn estimate_detailed<R: Rng + ?Sized>(
        &self,
        sequence: &QspSequence,
        rng: &mut R,
    ) -> QspResult<EstimateBreakdown> {
        if self.num_trials == 0 {
            return Err(QspError::InvalidTrialCount(0));
        }

        let n = sequence.len();
        let zero = self.hypotheses.get(Hypothesis::Zero);
        let one = self.hypotheses.get(Hypothesis::One);

        let mut total_zero = 0.0;
        let mut total_one = 0.0;
        for _ in 0..self.num_trials {
            let state = sequence.evolve((0..n).map(|_| zero.sample(rng)));
            total_zero += sequence.p_zero(&state);

            let state = sequence.evolve((0..n).map(|_| one.sample(rng)));
            total_one += 1.0 - sequence.p_zero(&state);
        }

        let trials = self.num_trials as f64;
        Ok(EstimateBreakdown {
            p_correct_zero: total_zero / trials,
            p_correct_one: total_one / trials,
            success: (total_zero + total_one) / 2.0 / trials,
            trials: self.num_trials,
        })
    }
}

/// Estimated success probability of a QSP strategy
///
/// Flat call surface for grid drivers: checks `n == phases.len()` and the
/// noise/trial preconditions, then runs `num_trials` trials on `rng`.
#[allow(clippy::too_many_arguments)]
pub fn estimate_success<R: Rng + ?Sized>(
    meansep: f64,
    std: f64,
    n: usize,
    phases: &[Angle],
    start: &Ket,
    end: &Bra,
    num_trials: usize,
    rng: &mut R,
) -> QspResult<f64> {
    let sequence = QspSequence::new(n, phases.to_vec(), *start, *end)?;
    SuccessEstimator::new(meansep, std)?
        .with_trials(num_trials)
        .estimate(&sequence, rng)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::FRAC_PI_2;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_zero_trials_rejected() {
        let seq = QspSequence::new(1, vec![0.0], Ket::zero(), Bra::zero()).unwrap();
        let est = SuccessEstimator::new(0.5, 0.1).unwrap().with_trials(0);
        assert_eq!(
            est.estimate(&seq, &mut rng(1)).unwrap_err(),
            QspError::InvalidTrialCount(0)
        );
    }

    #[test]
    fn test_length_mismatch_is_hard_failure() {
        let err = estimate_success(0.5, 0.1, 2, &[0.0], &Ket::zero(), &Bra::zero(), 10, &mut rng(1))
            .unwrap_err();
        assert!(err.is_precondition_error());
    }

    #[test]
    fn test_separable_point_is_perfect() {
        let p = estimate_success(
            FRAC_PI_2,
            0.0,
            1,
            &[0.0],
            &Ket::zero(),
            &Bra::zero(),
            5,
            &mut rng(3),
        )
        .unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_identical_hypotheses_without_noise() {
        let p = estimate_success(0.0, 0.0, 3, &[0.0; 3], &Ket::zero(), &Bra::zero(), 7, &mut rng(3))
            .unwrap();
        assert_eq!(p, 0.5);
    }

    #[test]
    fn test_breakdown_consistency() {
        let seq = QspSequence::new(2, vec![0.4, -0.2], Ket::plus(), Bra::zero()).unwrap();
        let est = SuccessEstimator::new(0.9, 0.2).unwrap().with_trials(200);
        let b = est.estimate_detailed(&seq, &mut rng(11)).unwrap();
        assert_abs_diff_eq!(b.success, 0.5 * (b.p_correct_zero + b.p_correct_one), epsilon = 1e-12);
        assert!(b.success >= 0.0 && b.success <= 1.0);
        assert_abs_diff_eq!(b.error(), 1.0 - b.success, epsilon = 1e-15);
    }

    #[test]
    fn test_same_seed_same_estimate() {
        let seq = QspSequence::new(2, vec![0.4, -0.2], Ket::zero(), Bra::plus()).unwrap();
        let est = SuccessEstimator::new(0.9, 0.3).unwrap();
        let a = est.estimate(&seq, &mut rng(21)).unwrap();
        let b = est.estimate(&seq, &mut rng(21)).unwrap();
        assert_eq!(a, b);
    }
}
