//! Rotation noise distributions
//!
//! Gantree: L2_Noise → NoiseDistribution
//!
//! Gaussian noise on the signal rotation angle and the two competing
//! hypotheses that share one standard deviation.

use qsp_core::{QspError, QspResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// NoiseDistribution
// ============================================================================

/// Stateless Gaussian sampler
/// Gantree: NoiseDistribution // 가우시안 노이즈
#[derive(Debug, Clone, Copy)]
pub struct NoiseDistribution {
    mean: f64,
    std: f64,
    normal: Normal<f64>,
}

impl NoiseDistribution {
    /// Create a Gaussian with the given mean and standard deviation
    ///
    /// `std = 0` is valid: every draw returns `mean`.
    pub fn gaussian(mean: f64, std: f64) -> QspResult<Self> {
        if !mean.is_finite() {
            return Err(QspError::InvalidNoiseMean(mean));
        }
        if !std.is_finite() || std < 0.0 {
            return Err(QspError::InvalidNoiseStd(std));
        }
        let normal = Normal::new(mean, std).map_err(|_| QspError::InvalidNoiseStd(std))?;
        Ok(Self { mean, std, normal })
    }

    /// Distribution mean
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Distribution standard deviation
    #[inline]
    pub fn std(&self) -> f64 {
        self.std
    }

    /// Draw one sample
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.normal.sample(rng)
    }

    /// Draw `count` independent samples
    pub fn sample_n<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

impl fmt::Display for NoiseDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N({:.4}, {:.4}^2)", self.mean, self.std)
    }
}

// ============================================================================
// Hypotheses
// ============================================================================

/// Which rotation distribution generated the data
/// Gantree: Hypothesis // 가설 0/1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hypothesis {
    /// Centered at zero, reported by measuring the end state
    Zero,
    /// Centered at the separation, reported by the orthogonal outcome
    One,
}

/// The two competing noise distributions
/// Gantree: HypothesisPair // (N(0,σ), N(δ,σ))
#[derive(Debug, Clone, Copy)]
pub struct HypothesisPair {
    zero: NoiseDistribution,
    one: NoiseDistribution,
}

impl HypothesisPair {
    /// Build `N(0, std)` and `N(meansep, std)`
    pub fn new(meansep: f64, std: f64) -> QspResult<Self> {
        Ok(Self {
            zero: NoiseDistribution::gaussian(0.0, std)?,
            one: NoiseDistribution::gaussian(meansep, std)?,
        })
    }

    /// Distribution for a hypothesis
    #[inline]
    pub fn get(&self, hypothesis: Hypothesis) -> &NoiseDistribution {
        match hypothesis {
            Hypothesis::Zero => &self.zero,
            Hypothesis::One => &self.one,
        }
    }

    /// Mean separation
    pub fn separation(&self) -> f64 {
        self.one.mean() - self.zero.mean()
    }

    /// Shared standard deviation
    pub fn std(&self) -> f64 {
        self.zero.std()
    }
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

    #[test]
    fn test_zero_std_collapses_to_mean() {
        let dist = NoiseDistribution::gaussian(1.25, 0.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(dist.sample(&mut rng), 1.25);
        }
    }

    #[test]
    fn test_invalid_std() {
        assert_eq!(
            NoiseDistribution::gaussian(0.0, -0.1).unwrap_err(),
            QspError::InvalidNoiseStd(-0.1)
        );
        assert!(NoiseDistribution::gaussian(0.0, f64::NAN).is_err());
        assert!(NoiseDistribution::gaussian(f64::INFINITY, 0.1).is_err());
    }

    #[test]
    fn test_sample_moments() {
        let dist = NoiseDistribution::gaussian(0.5, 0.2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let samples = dist.sample_n(50_000, &mut rng);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        assert_abs_diff_eq!(mean, 0.5, epsilon = 0.01);
        assert_abs_diff_eq!(var.sqrt(), 0.2, epsilon = 0.01);
    }

    #[test]
    fn test_hypothesis_pair() {
        let pair = HypothesisPair::new(0.8, 0.1).unwrap();
        assert_eq!(pair.get(Hypothesis::Zero).mean(), 0.0);
        assert_eq!(pair.get(Hypothesis::One).mean(), 0.8);
        assert_eq!(pair.separation(), 0.8);
        assert_eq!(pair.std(), 0.1);
    }
}
