//! # QSPD Sweep
//!
//! Parameter-grid sweeps over (separation, noise) and the classical
//! single-shot baseline they are compared against.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qsp_sweep // L5: Sweep (완료)
//!     GridSpec // π 단위 격자 (완료)
//!     AngleTable // (x,y) → 파라미터 JSON 저장 (완료)
//!     ProbabilityGrid // 행 우선 확률 격자 (완료)
//!         to_text(), from_text(), log_ratio()
//!     Sweep // 탐색 + 평가 (완료)
//!         sweep_angles() - x 바깥, y 안쪽
//!         evaluate_grid() - y 바깥, x 안쪽
//!     Baseline // 고전 헬스트롬 기준 (완료)
//!         classical_single_exact(), majority_vote()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qsp_sweep::prelude::*;
//!
//! let p = classical_single_exact(std::f64::consts::FRAC_PI_2, 0.0).unwrap();
//! assert!((p - 1.0).abs() < 1e-12);
//!
//! let maj3 = majority_vote(0.9, 3).unwrap();
//! assert!(maj3 > 0.9);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Sweep grid (Gantree: L5_Sweep → GridSpec)
pub mod grid;

/// Stored parameters per grid point (Gantree: L5_Sweep → AngleTable)
pub mod angle_table;

/// Probability grids (Gantree: L5_Sweep → ProbabilityGrid)
pub mod probability;

/// Search and evaluation passes (Gantree: L5_Sweep → Sweep)
pub mod sweep;

/// Classical baseline (Gantree: L5_Sweep → Baseline)
pub mod baseline;

// ============================================================================
// Re-exports
// ============================================================================

pub use angle_table::{AngleEntry, AngleTable};
pub use baseline::{classical_grid, classical_single_exact, majority_vote};
pub use grid::GridSpec;
pub use probability::ProbabilityGrid;
pub use sweep::{evaluate_grid, run_sweep, sweep_angles, SweepConfig};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qsp_sweep::prelude::*;
    //! ```

    pub use crate::angle_table::{AngleEntry, AngleTable};
    pub use crate::baseline::{classical_grid, classical_single_exact, majority_vote};
    pub use crate::grid::GridSpec;
    pub use crate::probability::ProbabilityGrid;
    pub use crate::sweep::{evaluate_grid, run_sweep, sweep_angles, SweepConfig};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_grid() -> GridSpec {
        GridSpec {
            xmin: 0.25,
            xmax: 0.5001,
            dx: 0.25,
            ymin: 0.0,
            ymax: 0.0501,
            dy: 0.05,
        }
    }

    #[test]
    fn test_qsp_one_matches_or_beats_classical_without_noise() {
        // n = 1 can realize the Helstrom measurement, so noise-free QSP
        // should not fall below the classical single shot
        let grid = GridSpec {
            ymax: 0.0001,
            ..small_grid()
        };
        let config = SweepConfig::new(1)
            .with_grid(grid)
            .with_search_trials(5)
            .with_final_trials(5);
        let (_, qsp) = run_sweep(&config, &mut ChaCha8Rng::seed_from_u64(12)).unwrap();
        let classical = classical_grid(&grid).unwrap();
        for i in 0..qsp.shape().0 {
            let q = qsp.get(i, 0).unwrap();
            let c = classical.get(i, 0).unwrap();
            assert!(q > c - 0.01, "column {}: qsp {} vs classical {}", i, q, c);
        }
    }

    #[test]
    fn test_table_persists_between_passes() {
        let config = SweepConfig::new(1)
            .with_grid(small_grid())
            .with_search_trials(10)
            .with_final_trials(20);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let table = sweep_angles(&config, &mut rng).unwrap();

        let restored = AngleTable::from_json(&table.to_json().unwrap()).unwrap();
        let a = evaluate_grid(&config, &table, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = evaluate_grid(&config, &restored, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_probability_text_matches_grid_shape() {
        let classical = classical_grid(&small_grid()).unwrap();
        let text = classical.to_text();
        let parsed = ProbabilityGrid::from_text(&text).unwrap();
        assert_eq!(parsed.shape(), (2, 2));
        assert_eq!(parsed, classical);
    }
}
