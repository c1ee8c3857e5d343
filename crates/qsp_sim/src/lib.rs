//! # QSPD Sim
//!
//! Monte Carlo estimation of how well a QSP sequence discriminates two
//! noisy rotation distributions.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qsp_sim // L3: Simulation (완료)
//!     QspSequence // 위상 + 시작 상태 + 측정 (완료)
//!         new() - n == len(phases) 검증
//!         evolve() - Rz(φ_i)·Rx(x_i) 적용
//!     SuccessEstimator // 몬테카를로 추정 (완료)
//!         estimate(), estimate_detailed()
//!     estimate_success() // 평면 호출 인터페이스 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qsp_sim::prelude::*;
//! use qsp_core::{Bra, Ket};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let p = estimate_success(
//!     std::f64::consts::FRAC_PI_2, // separation
//!     0.0,                         // noise std
//!     1,
//!     &[0.0],
//!     &Ket::zero(),
//!     &Bra::zero(),
//!     100,
//!     &mut rng,
//! )
//! .unwrap();
//! assert_eq!(p, 1.0);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Operation sequence (Gantree: L3_Sim → QspSequence)
pub mod sequence;

/// Success estimator (Gantree: L3_Sim → SuccessEstimator)
pub mod estimator;

// ============================================================================
// Re-exports
// ============================================================================

pub use estimator::{estimate_success, EstimateBreakdown, SuccessEstimator};
pub use sequence::QspSequence;

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qsp_sim::prelude::*;
    //! ```

    pub use crate::estimator::{estimate_success, EstimateBreakdown, SuccessEstimator};
    pub use crate::sequence::QspSequence;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use qsp_core::{Bra, Ket, StateAngles};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn sample_std(values: &[f64]) -> f64 {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
        var.sqrt()
    }

    #[test]
    fn test_no_separation_is_coin_flip() {
        // Both hypotheses share one distribution: expected success 1/2
        let seq = QspSequence::from_angles(
            vec![0.3, 1.1],
            StateAngles::new(0.2, 0.5),
            StateAngles::new(0.9, -0.4),
        )
        .unwrap();
        let est = SuccessEstimator::new(0.0, 0.4).unwrap().with_trials(20_000);
        let p = est.estimate(&seq, &mut ChaCha8Rng::seed_from_u64(17)).unwrap();
        assert_abs_diff_eq!(p, 0.5, epsilon = 0.02);
    }

    #[test]
    fn test_noise_lowers_expected_success() {
        // With meansep = pi/2, n = 1, trivial phases: E[success] = (1 + e^{-2σ²}) / 2
        let seq = QspSequence::new(1, vec![0.0], Ket::zero(), Bra::zero()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut previous = f64::INFINITY;
        for &std in &[0.0, 0.1, 0.3, 0.6, 1.0] {
            let est = SuccessEstimator::new(FRAC_PI_2, std).unwrap().with_trials(20_000);
            let p = est.estimate(&seq, &mut rng).unwrap();
            let expected = 0.5 * (1.0 + (-2.0 * std * std).exp());
            assert_abs_diff_eq!(p, expected, epsilon = 0.02);
            assert!(p < previous + 1e-3, "std={} p={} previous={}", std, p, previous);
            previous = p;
        }
    }

    #[test]
    fn test_standard_error_scaling() {
        let seq = QspSequence::new(2, vec![0.7, -0.3], Ket::zero(), Bra::plus()).unwrap();
        let est = SuccessEstimator::new(FRAC_PI_4, 0.5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        let repeats = 300;
        let small: Vec<f64> = (0..repeats)
            .map(|_| est.with_trials(100).estimate(&seq, &mut rng).unwrap())
            .collect();
        let large: Vec<f64> = (0..repeats)
            .map(|_| est.with_trials(400).estimate(&seq, &mut rng).unwrap())
            .collect();

        let ratio = sample_std(&small) / sample_std(&large);
        assert!(ratio > 1.6 && ratio < 2.5, "std ratio = {}", ratio);
    }

    #[test]
    fn test_estimate_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for k in 0..20 {
            let phases = vec![0.1 * k as f64, -0.2 * k as f64, 0.05];
            let p = estimate_success(
                0.3 * k as f64,
                0.05 * k as f64,
                3,
                &phases,
                &Ket::from_angles(0.1 * k as f64, 0.0),
                &Bra::from_angles(0.4, 0.2 * k as f64),
                50,
                &mut rng,
            )
            .unwrap();
            assert!((0.0..=1.0).contains(&p), "p = {}", p);
        }
    }
}
