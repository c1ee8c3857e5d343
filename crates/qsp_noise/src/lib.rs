//! # QSPD Noise
//!
//! Gaussian rotation noise and resettable random sources.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qsp_noise // L2: Noise Model (완료)
//!     NoiseDistribution // 가우시안 샘플러 (완료)
//!         gaussian(mean, std), sample(), sample_n()
//!     HypothesisPair // 두 가설 분포 (완료)
//!         N(0, σ), N(δ, σ)
//!     SeededSource // 시드 재설정 난수원 (완료)
//!         new(seed), from_rng(), reset(), reset_rng()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qsp_noise::prelude::*;
//!
//! let pair = HypothesisPair::new(0.5, 0.1).unwrap();
//! let mut source = SeededSource::new(42);
//!
//! let a = pair.get(Hypothesis::One).sample(source.reset_rng());
//! let b = pair.get(Hypothesis::One).sample(source.reset_rng());
//! assert_eq!(a, b);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Noise distributions (Gantree: L2_Noise → NoiseDistribution)
pub mod distribution;

/// Seeded random source (Gantree: L2_Noise → SeededSource)
pub mod source;

// ============================================================================
// Re-exports
// ============================================================================

pub use distribution::{Hypothesis, HypothesisPair, NoiseDistribution};
pub use source::SeededSource;

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qsp_noise::prelude::*;
    //! ```

    pub use crate::distribution::{Hypothesis, HypothesisPair, NoiseDistribution};
    pub use crate::source::SeededSource;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_replayed_noise_sequence() {
        let pair = HypothesisPair::new(0.3, 0.2).unwrap();
        let mut source = SeededSource::new(7);

        let draw = |source: &mut SeededSource| -> Vec<f64> {
            let rng = source.reset_rng();
            let mut out = pair.get(Hypothesis::Zero).sample_n(4, rng);
            out.extend(pair.get(Hypothesis::One).sample_n(4, rng));
            out
        };

        let first = draw(&mut source);
        let second = draw(&mut source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_seeds_differ() {
        let pair = HypothesisPair::new(0.0, 1.0).unwrap();
        let mut a = SeededSource::new(1);
        let mut b = SeededSource::new(2);
        let xa = pair.get(Hypothesis::Zero).sample(a.rng_mut());
        let xb = pair.get(Hypothesis::Zero).sample(b.rng_mut());
        assert_ne!(xa, xb);
    }
}
