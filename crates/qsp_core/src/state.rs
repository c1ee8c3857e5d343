//! Two-level states
//!
//! Gantree: L1_Algebra → State
//!
//! Kets, bras, and the two-angle state parametrization
//! `cos(theta)|0> + e^{i phi} sin(theta)|1>`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Rotation or state angle in radians
/// Gantree: Angle // pub type Angle = f64
pub type Angle = f64;

// ============================================================================
// Ket
// ============================================================================

/// Column state vector
/// Gantree: Ket // 2-성분 복소 벡터
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ket(pub [Complex64; 2]);

impl Ket {
    /// Create from amplitudes
    pub fn new(a0: Complex64, a1: Complex64) -> Self {
        Self([a0, a1])
    }

    /// Build from the standard angle parameters
    /// Gantree: ket(theta,phi) -> Ket // 상태 생성
    pub fn from_angles(theta: Angle, phi: Angle) -> Self {
        Self::new(
            Complex64::new(theta.cos(), 0.0),
            Complex64::from_polar(1.0, phi) * theta.sin(),
        )
    }

    /// |0>
    pub fn zero() -> Self {
        Self::new(Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0))
    }

    /// |1>
    pub fn one() -> Self {
        Self::new(Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0))
    }

    /// |+>
    pub fn plus() -> Self {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        Self::new(Complex64::new(h, 0.0), Complex64::new(h, 0.0))
    }

    /// |->
    pub fn minus() -> Self {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        Self::new(Complex64::new(h, 0.0), Complex64::new(-h, 0.0))
    }

    /// Amplitude of |0>
    #[inline]
    pub fn a0(&self) -> Complex64 {
        self.0[0]
    }

    /// Amplitude of |1>
    #[inline]
    pub fn a1(&self) -> Complex64 {
        self.0[1]
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        (self.0[0].norm_sqr() + self.0[1].norm_sqr()).sqrt()
    }

    /// Conjugate transpose
    pub fn dagger(&self) -> Bra {
        Bra([self.0[0].conj(), self.0[1].conj()])
    }
}

impl fmt::Display for Ket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4})|0> + ({:.4})|1>", self.0[0], self.0[1])
    }
}

// ============================================================================
// Bra
// ============================================================================

/// Row measurement vector (conjugate dual of a ket)
/// Gantree: Bra // 측정 쌍대 벡터
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bra(pub [Complex64; 2]);

impl Bra {
    /// Build as the conjugate transpose of `Ket::from_angles(theta, phi)`
    /// Gantree: bra(theta,phi) -> Bra // 측정 생성
    pub fn from_angles(theta: Angle, phi: Angle) -> Self {
        Ket::from_angles(theta, phi).dagger()
    }

    /// <0|
    pub fn zero() -> Self {
        Ket::zero().dagger()
    }

    /// <1|
    pub fn one() -> Self {
        Ket::one().dagger()
    }

    /// <+|
    pub fn plus() -> Self {
        Ket::plus().dagger()
    }

    /// <-|
    pub fn minus() -> Self {
        Ket::minus().dagger()
    }

    /// Conjugate transpose
    pub fn dagger(&self) -> Ket {
        Ket([self.0[0].conj(), self.0[1].conj()])
    }

    /// Probability `|<self|state>|^2`
    #[inline]
    pub fn probability(&self, state: &Ket) -> f64 {
        (*self * *state).norm_sqr()
    }
}

/// Inner product `<bra|ket>`
impl Mul<Ket> for Bra {
    type Output = Complex64;

    fn mul(self, ket: Ket) -> Complex64 {
        self.0[0] * ket.0[0] + self.0[1] * ket.0[1]
    }
}

// ============================================================================
// Angle Pair
// ============================================================================

/// Polar/phase angle pair describing a start state or end measurement
/// Gantree: StateAngles // (theta, phi)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StateAngles {
    /// Polar angle
    pub theta: Angle,

    /// Relative phase
    pub phi: Angle,
}

impl StateAngles {
    /// Create an angle pair
    pub fn new(theta: Angle, phi: Angle) -> Self {
        Self { theta, phi }
    }

    /// Prepared ket
    pub fn ket(&self) -> Ket {
        Ket::from_angles(self.theta, self.phi)
    }

    /// Measurement bra
    pub fn bra(&self) -> Bra {
        Bra::from_angles(self.theta, self.phi)
    }
}

// ============================================================================
// Free Constructors
// ============================================================================

/// Reconstruct a start state from persisted angles
pub fn build_state(theta: Angle, phi: Angle) -> Ket {
    Ket::from_angles(theta, phi)
}

/// Reconstruct an end measurement from persisted angles
pub fn build_measurement(theta: Angle, phi: Angle) -> Bra {
    Bra::from_angles(theta, phi)
}

// ============================================================================
// Tests
// ============================================================================
