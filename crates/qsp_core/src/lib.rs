//! # QSPD Core
//!
//! Two-level state and operator algebra for Quantum Signal Processing
//! discrimination.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qsp_core // L0+L1: Foundation + Algebra (완료)
//!     L0_Foundation // 기반 상수/에러 (완료)
//!         Constants // 시뮬레이션/최적화/그리드 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!     L1_Algebra // 2-준위 대수 (완료)
//!         State // ket, bra, StateAngles (완료)
//!         Operator // 2x2 행렬, Pauli, exp_i (완료)
//!         Rotations // rotation_x, rotation_z (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qsp_core::prelude::*;
//!
//! // |0> rotated by exp(i·pi/2·X) ends up in |1>
//! let state = rotation_x(std::f64::consts::FRAC_PI_2) * Ket::zero();
//! let p_one = Bra::one().probability(&state);
//! assert!((p_one - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Parametrized States
//!
//! ```rust
//! use qsp_core::prelude::*;
//!
//! let start = build_state(0.3, 1.2);
//! let end = build_measurement(0.3, 1.2);
//! assert!((end.probability(&start) - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Kets and bras (Gantree: L1_Algebra → State)
pub mod state;

/// Operators and rotations (Gantree: L1_Algebra → Operator)
pub mod operator;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{grid, optim, sim};
pub use error::{QspError, QspResult};
pub use num_complex::Complex64;
pub use operator::{rotation_x, rotation_z, Operator, Pauli};
pub use state::{build_measurement, build_state, Angle, Bra, Ket, StateAngles};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qsp_core::prelude::*;
    //! ```

    pub use crate::constants::{grid, optim, sim};
    pub use crate::error::{QspError, QspResult};
    pub use crate::operator::{rotation_x, rotation_z, Operator, Pauli};
    pub use crate::state::{build_measurement, build_state, Angle, Bra, Ket, StateAngles};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
