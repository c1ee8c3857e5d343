//! # QSPD Optimize
//!
//! Seeded local optimization of QSP phases and state angles.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qsp_optimize // L4: Optimization (완료)
//!     OptimizerConfig // 문제 지점 + 최소화 설정 (완료)
//!     QspParams // n+4 파라미터 구조화 (완료)
//!         pack(), unpack(), random()
//!     SeededObjective // 평가마다 시드 재설정 (완료)
//!     Minimizer // 국소 최소화 (완료)
//!         Bfgs - 유한차분 기울기 + Armijo
//!         NelderMead - 심플렉스
//!     QspOptimizer // 시드 추출 → 초기값 → 최소화 (완료)
//!     optimize() // 간편 인터페이스 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qsp_optimize::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let result = optimize(std::f64::consts::FRAC_PI_2, 0.0, 1, 100, &mut rng).unwrap();
//!
//! assert_eq!(result.to_vector().len(), 5);
//! assert!(result.error_probability >= 0.0);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Optimizer configuration (Gantree: L4_Optimize → OptimizerConfig)
pub mod config;

/// Parameter record (Gantree: L4_Optimize → QspParams)
pub mod params;

/// Seeded objective (Gantree: L4_Optimize → Objective)
pub mod objective;

/// Local minimizers (Gantree: L4_Optimize → Minimizer)
pub mod minimizer;

/// Optimization driver (Gantree: L4_Optimize → QspOptimizer)
pub mod driver;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{Method, OptimizerConfig};
pub use driver::{optimize, OptimizationResult, QspOptimizer};
pub use minimizer::{minimize, MinimizeOptions, MinimizeReport};
pub use objective::{ObjectiveContext, SeededObjective};
pub use params::QspParams;

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qsp_optimize::prelude::*;
    //! ```

    pub use crate::config::{Method, OptimizerConfig};
    pub use crate::driver::{optimize, OptimizationResult, QspOptimizer};
    pub use crate::params::QspParams;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_optimizer_beats_random_start() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let config = OptimizerConfig::new(1.0, 0.1, 2).with_trials(50);

        // Same generator state the optimizer will consume
        let mut probe = rng.clone();
        let seed = qsp_noise::SeededSource::from_rng(&mut probe).seed();
        let start = QspParams::random(2, &mut probe);
        let start_error = crate::SeededObjective::new(crate::ObjectiveContext {
            meansep: 1.0,
            std: 0.1,
            n: 2,
            num_trials: 50,
            seed,
        })
        .evaluate(&start.pack())
        .unwrap();

        let result = QspOptimizer::new(config).optimize(&mut rng).unwrap();
        assert_eq!(result.seed, seed);
        assert!(result.error_probability <= start_error);
    }

    #[test]
    fn test_consecutive_runs_use_fresh_seeds() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let a = optimize(0.5, 0.2, 1, 20, &mut rng).unwrap();
        let b = optimize(0.5, 0.2, 1, 20, &mut rng).unwrap();
        assert_ne!(a.seed, b.seed);
    }

    #[test]
    fn test_result_serializes() {
        let result = optimize(0.5, 0.0, 1, 10, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("error_probability"));
    }
}
