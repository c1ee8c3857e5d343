//! Seeded QSP optimizer
//!
//! Gantree: L4_Optimize → QspOptimizer
//!
//! One run per grid point: draw a seed and a random start from the caller's
//! generator, freeze the noise to that seed, then minimize the error
//! probability locally.

use crate::config::OptimizerConfig;
use crate::minimizer::{minimize, MinimizeOptions};
use crate::objective::{ObjectiveContext, SeededObjective};
use crate::params::QspParams;
use qsp_core::QspResult;
use qsp_noise::SeededSource;
use qsp_sim::SuccessEstimator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Best parameters found by one run
/// Gantree: OptimizationResult // 최적화 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Parameters at the end of the search
    pub params: QspParams,

    /// Seeded error probability at `params`
    pub error_probability: f64,

    /// Seed the objective replayed
    pub seed: u64,

    /// Minimizer iterations
    pub iterations: usize,

    /// Objective evaluations
    pub evaluations: usize,

    /// Whether the minimizer met its convergence criterion
    pub converged: bool,

    /// Minimizer termination reason
    pub message: String,
}

impl OptimizationResult {
    /// Packed parameter vector of length `n + 4`
    pub fn to_vector(&self) -> Vec<f64> {
        self.params.pack()
    }

    /// `(packed parameters, error probability)`
    pub fn into_pair(self) -> (Vec<f64>, f64) {
        (self.params.pack(), self.error_probability)
    }

    /// Fresh Monte Carlo estimate of the error probability at these parameters
    /// Gantree: reevaluate(meansep,std,trials,rng) -> f64 // 재평가
    pub fn reevaluate<R: Rng + ?Sized>(
        &self,
        meansep: f64,
        std: f64,
        num_trials: usize,
        rng: &mut R,
    ) -> QspResult<f64> {
        let sequence = self.params.to_sequence()?;
        let success = SuccessEstimator::new(meansep, std)?
            .with_trials(num_trials)
            .estimate(&sequence, rng)?;
        Ok(1.0 - success)
    }
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error={:.6} seed={} iters={} evals={} converged={}",
            self.error_probability, self.seed, self.iterations, self.evaluations, self.converged
        )
    }
}

/// QSP parameter optimizer
/// Gantree: QspOptimizer // 최적화기
#[derive(Debug, Clone)]
pub struct QspOptimizer {
    config: OptimizerConfig,
}

impl QspOptimizer {
    /// Create with configuration
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run one seeded local optimization
    ///
    /// Consumes exactly one seed draw followed by `n + 4` uniform draws from
    /// `rng`, so identical generator states give identical results.
    /// Gantree: optimize(&self,rng) -> OptimizationResult // 메인 루프
    pub fn optimize<R: Rng + ?Sized>(&self, rng: &mut R) -> QspResult<OptimizationResult> {
        self.config.validate()?;
        let config = &self.config;

        let seed = SeededSource::from_rng(rng).seed();
        let start = QspParams::random(config.n, rng);

        log::info!(
            "optimizing {} (seed {}, dim {})",
            config,
            seed,
            config.dimension()
        );

        let mut objective = SeededObjective::new(ObjectiveContext {
            meansep: config.meansep,
            std: config.std,
            n: config.n,
            num_trials: config.num_trials,
            seed,
        });

        let report = minimize(
            config.method,
            |x| objective.evaluate(x),
            &start.pack(),
            &MinimizeOptions::from_config(config),
        )?;

        if !report.converged {
            log::warn!("{} did not converge: {}", config.method, report.message);
        }

        let result = OptimizationResult {
            params: QspParams::unpack(&report.x, config.n)?,
            error_probability: report.fun,
            seed,
            iterations: report.iterations,
            evaluations: report.evaluations,
            converged: report.converged,
            message: report.message,
        };
        log::info!("done: {}", result);
        Ok(result)
    }
}

/// Optimize with default minimizer settings
/// Gantree: optimize(meansep,std,n,trials,rng) -> OptimizationResult // 간편 인터페이스
pub fn optimize<R: Rng + ?Sized>(
    meansep: f64,
    std: f64,
    n: usize,
    num_trials: usize,
    rng: &mut R,
) -> QspResult<OptimizationResult> {
    let config = OptimizerConfig::new(meansep, std, n).with_trials(num_trials);
    QspOptimizer::new(config).optimize(rng)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Method;
    use qsp_core::QspError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_separable_point_reaches_zero_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let result = optimize(1.5708, 0.0, 1, 100, &mut rng).unwrap();
        assert!(result.error_probability < 0.01, "{}", result);
        assert_eq!(result.to_vector().len(), 5);
    }

    #[test]
    fn test_same_generator_state_same_result() {
        let a = optimize(0.8, 0.2, 2, 20, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let b = optimize(0.8, 0.2, 2, 20, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_error_matches_seeded_objective() {
        let result = optimize(0.6, 0.1, 2, 30, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let mut objective = SeededObjective::new(ObjectiveContext {
            meansep: 0.6,
            std: 0.1,
            n: 2,
            num_trials: 30,
            seed: result.seed,
        });
        let replay = objective.evaluate(&result.to_vector()).unwrap();
        assert_eq!(replay, result.error_probability);
    }

    #[test]
    fn test_nelder_mead_run() {
        let config = OptimizerConfig::new(FRAC_PI_2, 0.0, 1)
            .with_trials(10)
            .with_method(Method::NelderMead);
        let result = QspOptimizer::new(config)
            .optimize(&mut ChaCha8Rng::seed_from_u64(1))
            .unwrap();
        assert!((0.0..=1.0).contains(&result.error_probability));
        assert_eq!(result.params.n(), 1);
    }

    #[test]
    fn test_invalid_config() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            optimize(0.5, 0.1, 0, 100, &mut rng).unwrap_err(),
            QspError::EmptySequence
        );
        assert!(optimize(0.5, -1.0, 1, 100, &mut rng).is_err());
        assert!(optimize(0.5, 0.1, 1, 0, &mut rng).is_err());
    }

    #[test]
    fn test_reevaluate_and_pair() {
        let result = optimize(FRAC_PI_2, 0.0, 1, 50, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let fresh = result
            .reevaluate(FRAC_PI_2, 0.0, 500, &mut ChaCha8Rng::seed_from_u64(10))
            .unwrap();
        // Noise-free: every trial is identical
        assert!((fresh - result.error_probability).abs() < 1e-12);

        let error = result.error_probability;
        let (vector, pair_error) = result.into_pair();
        assert_eq!(vector.len(), 5);
        assert_eq!(pair_error, error);
    }
}
