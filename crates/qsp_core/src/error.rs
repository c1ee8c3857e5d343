//! Error types for QSPD
//!
//! Gantree: L0_Foundation → Errors
//!
//! Precondition failures, numerical input errors, and persistence errors.
//! Minimizer non-convergence is deliberately absent: it is reported through
//! the optimization result, never as an error.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QSPD
/// Gantree: QspError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QspError {
    // ========================================================================
    // Precondition Errors
    // ========================================================================
    /// Declared sequence length does not match the phase list
    /// Gantree: SequenceLengthMismatch{{expected,actual}} // n != len(phases)
    #[error("Sequence length mismatch: n = {expected} but {actual} phases given")]
    SequenceLengthMismatch { expected: usize, actual: usize },

    /// QSP sequence of length zero
    #[error("QSP sequence length must be >= 1")]
    EmptySequence,

    /// Zero Monte Carlo trials
    #[error("Invalid trial count {0}: must be >= 1")]
    InvalidTrialCount(usize),

    /// Negative or non-finite noise standard deviation
    #[error("Invalid noise std {0}: must be finite and >= 0")]
    InvalidNoiseStd(f64),

    /// Non-finite distribution mean
    #[error("Invalid noise mean {0}: must be finite")]
    InvalidNoiseMean(f64),

    /// Minimizer or sweep setting out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Flat parameter vector has the wrong length
    /// Gantree: InvalidParameterLength{{expected,actual}} // n+4
    #[error("Invalid parameter vector length {actual}: expected {expected}")]
    InvalidParameterLength { expected: usize, actual: usize },

    // ========================================================================
    // Sweep Errors
    // ========================================================================
    /// Malformed grid specification
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Grid point missing from a persisted angle table
    #[error("No stored parameters for grid point ({x:.3}, {y:.3})")]
    MissingGridPoint { x: f64, y: f64 },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for QSPD operations
/// Gantree: QspResult<T> // type alias
pub type QspResult<T> = Result<T, QspError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QspError {
    fn from(err: serde_json::Error) -> Self {
        QspError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QspError {
    fn from(err: std::io::Error) -> Self {
        QspError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QspError {
    /// Check if error is a caller precondition violation
    pub fn is_precondition_error(&self) -> bool {
        matches!(
            self,
            QspError::SequenceLengthMismatch { .. }
                | QspError::EmptySequence
                | QspError::InvalidTrialCount(_)
                | QspError::InvalidNoiseStd(_)
                | QspError::InvalidNoiseMean(_)
                | QspError::InvalidParameterLength { .. }
                | QspError::InvalidConfig(_)
        )
    }

    /// Check if error came from persistence
    pub fn is_io_error(&self) -> bool {
        matches!(self, QspError::JsonError(_) | QspError::FileError(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
