//! Optimization objective
//!
//! Gantree: L4_Optimize → Objective
//!
//! `ObjectiveContext` carries everything the parameter → error mapping
//! needs, so nothing is captured implicitly. `SeededObjective` owns the
//! run's `SeededSource` and rewinds it before every evaluation: each
//! candidate vector sees exactly the same noise draws.

use crate::params::QspParams;
use qsp_core::QspResult;
use qsp_noise::SeededSource;
use qsp_sim::SuccessEstimator;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed inputs of one optimization run
/// Gantree: ObjectiveContext // 목적함수 문맥
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveContext {
    /// Separation between the two noise means
    pub meansep: f64,

    /// Shared noise standard deviation
    pub std: f64,

    /// QSP sequence length
    pub n: usize,

    /// Monte Carlo trials per evaluation
    pub num_trials: usize,

    /// Seed replayed at the start of every evaluation
    pub seed: u64,
}

impl ObjectiveContext {
    /// Error probability `1 − success` for a packed vector, drawing noise from `rng`
    pub fn error_probability<R: Rng + ?Sized>(&self, flat: &[f64], rng: &mut R) -> QspResult<f64> {
        let params = QspParams::unpack(flat, self.n)?;
        let sequence = params.to_sequence()?;
        let success = SuccessEstimator::new(self.meansep, self.std)?
            .with_trials(self.num_trials)
            .estimate(&sequence, rng)?;
        Ok(1.0 - success)
    }
}

/// Deterministic objective: context plus a rewound random source
/// Gantree: SeededObjective // 시드 고정 목적함수
#[derive(Debug, Clone)]
pub struct SeededObjective {
    context: ObjectiveContext,
    source: SeededSource,
    evaluations: usize,
}

impl SeededObjective {
    /// Create from a context; the source is seeded with `context.seed`
    pub fn new(context: ObjectiveContext) -> Self {
        Self {
            source: SeededSource::new(context.seed),
            context,
            evaluations: 0,
        }
    }

    /// Reset the source, then evaluate
    /// Gantree: evaluate(&mut,x) -> f64 // 리셋 후 평가
    pub fn evaluate(&mut self, flat: &[f64]) -> QspResult<f64> {
        self.evaluations += 1;
        let rng = self.source.reset_rng();
        self.context.error_probability(flat, rng)
    }

    /// Evaluations so far
    #[inline]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Run context
    pub fn context(&self) -> &ObjectiveContext {
        &self.context
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qsp_core::QspError;

    fn context(seed: u64) -> ObjectiveContext {
        ObjectiveContext {
            meansep: 0.7,
            std: 0.3,
            n: 2,
            num_trials: 50,
            seed,
        }
    }

    #[test]
    fn test_repeat_evaluation_is_identical() {
        let mut objective = SeededObjective::new(context(12));
        let x = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let a = objective.evaluate(&x).unwrap();
        let b = objective.evaluate(&x).unwrap();
        assert_eq!(a, b);
        assert_eq!(objective.evaluations(), 2);
    }

    #[test]
    fn test_objective_is_smooth_under_fixed_seed() {
        let mut objective = SeededObjective::new(context(3));
        let x = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let mut y = x;
        y[0] += 1e-9;
        let fx = objective.evaluate(&x).unwrap();
        let fy = objective.evaluate(&y).unwrap();
        assert!((fx - fy).abs() < 1e-7);
    }

    #[test]
    fn test_different_seeds_differ() {
        let x = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let a = SeededObjective::new(context(1)).evaluate(&x).unwrap();
        let b = SeededObjective::new(context(2)).evaluate(&x).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_length() {
        let mut objective = SeededObjective::new(context(1));
        assert!(matches!(
            objective.evaluate(&[0.0; 5]),
            Err(QspError::InvalidParameterLength { .. })
        ));
    }
}
