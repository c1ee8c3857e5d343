//! Two-level operators
//!
//! Gantree: L1_Algebra → Operator
//!
//! 2×2 complex matrices, Pauli generators, and the exact exponential
//! `exp(i·theta·H)` for Hermitian `H`.
//!
//! Every 2×2 Hermitian matrix decomposes as `H = a·I + b·(n·σ)` with
//! `|n| = 1`, and `(n·σ)^2 = I`, so
//! `exp(i·theta·H) = e^{i·theta·a} (cos(theta·b)·I + i·sin(theta·b)·(n·σ))`
//! holds exactly for every real `theta`.

use crate::state::{Angle, Ket};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

// ============================================================================
// Pauli Generators
// ============================================================================

/// Pauli generator
/// Gantree: Pauli // I, X, Y, Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity
    I,
    /// Bit flip
    X,
    /// Bit + phase flip
    Y,
    /// Phase flip
    Z,
}

impl Pauli {
    /// Matrix representation
    pub fn matrix(self) -> Operator {
        match self {
            Pauli::I => Operator::identity(),
            Pauli::X => Operator::new([[ZERO, ONE], [ONE, ZERO]]),
            Pauli::Y => Operator::new([[ZERO, -I], [I, ZERO]]),
            Pauli::Z => Operator::new([[ONE, ZERO], [ZERO, -ONE]]),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        write!(f, "{}", s)
    }
}

// ============================================================================
// Operator
// ============================================================================

/// 2×2 complex matrix, row-major
/// Gantree: Operator // 2x2 유니터리
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Operator(pub [[Complex64; 2]; 2]);

impl Operator {
    /// Create from rows
    pub fn new(rows: [[Complex64; 2]; 2]) -> Self {
        Self(rows)
    }

    /// Identity
    pub fn identity() -> Self {
        Self([[ONE, ZERO], [ZERO, ONE]])
    }

    /// Entry at (row, col)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.0[row][col]
    }

    /// Conjugate transpose
    pub fn dagger(&self) -> Self {
        let m = &self.0;
        Self([
            [m[0][0].conj(), m[1][0].conj()],
            [m[0][1].conj(), m[1][1].conj()],
        ])
    }

    /// Scale every entry
    pub fn scale(&self, s: Complex64) -> Self {
        let m = &self.0;
        Self([[m[0][0] * s, m[0][1] * s], [m[1][0] * s, m[1][1] * s]])
    }

    /// Largest entrywise deviation from another operator
    pub fn max_abs_diff(&self, other: &Operator) -> f64 {
        let mut max = 0.0f64;
        for r in 0..2 {
            for c in 0..2 {
                max = max.max((self.0[r][c] - other.0[r][c]).norm());
            }
        }
        max
    }

    /// Check `U·U† = I` within `tol`
    pub fn is_unitary(&self, tol: f64) -> bool {
        (*self * self.dagger()).max_abs_diff(&Operator::identity()) <= tol
    }

    /// Check `H = H†` within `tol`
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.max_abs_diff(&self.dagger()) <= tol
    }

    /// Exact `exp(i·theta·H)` for a Hermitian generator `H`
    /// Gantree: exp_i(theta,H) -> Operator // 정확한 행렬 지수
    ///
    /// The anti-Hermitian part of `h` is ignored.
    pub fn exp_i(theta: Angle, h: &Operator) -> Self {
        let m = &h.0;
        let a = 0.5 * (m[0][0].re + m[1][1].re);
        let bz = 0.5 * (m[0][0].re - m[1][1].re);
        let bx = 0.5 * (m[0][1].re + m[1][0].re);
        let by = 0.5 * (m[1][0].im - m[0][1].im);
        let b = (bx * bx + by * by + bz * bz).sqrt();

        let global = Complex64::from_polar(1.0, theta * a);
        if b == 0.0 {
            return Operator::identity().scale(global);
        }

        let (nx, ny, nz) = (bx / b, by / b, bz / b);
        let c = Complex64::new((theta * b).cos(), 0.0);
        let s = I * (theta * b).sin();
        let n_sigma = [
            [Complex64::new(nz, 0.0), Complex64::new(nx, -ny)],
            [Complex64::new(nx, ny), Complex64::new(-nz, 0.0)],
        ];

        Self([
            [c + s * n_sigma[0][0], s * n_sigma[0][1]],
            [s * n_sigma[1][0], c + s * n_sigma[1][1]],
        ])
        .scale(global)
    }

    /// Exact `exp(i·theta·P)` for a Pauli generator
    pub fn exp_i_pauli(theta: Angle, pauli: Pauli) -> Self {
        Self::exp_i(theta, &pauli.matrix())
    }
}

impl Mul for Operator {
    type Output = Operator;

    fn mul(self, rhs: Operator) -> Operator {
        let a = &self.0;
        let b = &rhs.0;
        Operator([
            [
                a[0][0] * b[0][0] + a[0][1] * b[1][0],
                a[0][0] * b[0][1] + a[0][1] * b[1][1],
            ],
            [
                a[1][0] * b[0][0] + a[1][1] * b[1][0],
                a[1][0] * b[0][1] + a[1][1] * b[1][1],
            ],
        ])
    }
}

impl Mul<Ket> for Operator {
    type Output = Ket;

    fn mul(self, ket: Ket) -> Ket {
        let m = &self.0;
        Ket([
            m[0][0] * ket.0[0] + m[0][1] * ket.0[1],
            m[1][0] * ket.0[0] + m[1][1] * ket.0[1],
        ])
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.0;
        writeln!(f, "[{:.4}, {:.4}]", m[0][0], m[0][1])?;
        write!(f, "[{:.4}, {:.4}]", m[1][0], m[1][1])
    }
}

// ============================================================================
// Rotations
// ============================================================================

/// `exp(i·theta·X)`, a rotation by `-2·theta` about the x-axis
/// Gantree: rotation_x(theta) -> Operator // Rx
pub fn rotation_x(theta: Angle) -> Operator {
    Operator::exp_i_pauli(theta, Pauli::X)
}

/// `exp(i·theta·Z)`, a rotation by `-2·theta` about the z-axis
/// Gantree: rotation_z(theta) -> Operator // Rz
pub fn rotation_z(theta: Angle) -> Operator {
    Operator::exp_i_pauli(theta, Pauli::Z)
}

// ============================================================================
// Tests
// ============================================================================
