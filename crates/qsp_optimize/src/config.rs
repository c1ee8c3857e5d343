//! Optimizer configuration
//!
//! Gantree: L4_Optimize → OptimizerConfig
//!
//! Problem point (separation, noise, length, trials) plus minimizer knobs.

use qsp_core::{optim, sim, QspError, QspResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Local minimization method
/// Gantree: Method // 최적화 방법
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Method {
    /// Quasi-Newton with finite-difference gradients
    /// Gantree: Bfgs // 준뉴턴
    #[default]
    Bfgs,

    /// Derivative-free simplex search
    /// Gantree: NelderMead // 심플렉스
    NelderMead,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Bfgs => write!(f, "BFGS"),
            Method::NelderMead => write!(f, "Nelder-Mead"),
        }
    }
}

/// Optimizer configuration
/// Gantree: OptimizerConfig // 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Separation between the two noise means
    /// Gantree: meansep: f64 // 평균 간격
    pub meansep: f64,

    /// Shared noise standard deviation
    /// Gantree: std: f64 // 표준편차
    pub std: f64,

    /// QSP sequence length
    /// Gantree: n: usize // 시퀀스 길이
    pub n: usize,

    /// Monte Carlo trials per objective evaluation
    /// Gantree: num_trials: usize // 평가당 시행 수 (100)
    pub num_trials: usize,

    /// Minimization method
    pub method: Method,

    /// BFGS gradient tolerance
    pub gtol: f64,

    /// Finite-difference step for BFGS gradients
    pub fd_step: f64,

    /// Internal iteration cap; `None` uses `200 · (n + 4)`
    pub max_iterations: Option<usize>,
}

impl OptimizerConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Configuration for one grid point with default minimizer settings
    pub fn new(meansep: f64, std: f64, n: usize) -> Self {
        Self {
            meansep,
            std,
            n,
            num_trials: sim::DEFAULT_NUM_TRIALS,
            method: Method::Bfgs,
            gtol: optim::GTOL,
            fd_step: optim::FD_STEP,
            max_iterations: None,
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set trials per evaluation
    pub fn with_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    /// Set minimization method
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set gradient tolerance
    pub fn with_gtol(mut self, gtol: f64) -> Self {
        self.gtol = gtol;
        self
    }

    /// Set finite-difference step
    pub fn with_fd_step(mut self, fd_step: f64) -> Self {
        self.fd_step = fd_step;
        self
    }

    /// Override the internal iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Packed parameter length `n + 4`
    pub fn dimension(&self) -> usize {
        sim::param_len(self.n)
    }

    /// Effective iteration cap
    pub fn iteration_cap(&self) -> usize {
        self.max_iterations
            .unwrap_or_else(|| optim::max_iterations(self.dimension()))
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> QspResult<()> {
        if self.n == 0 {
            return Err(QspError::EmptySequence);
        }

        if self.num_trials == 0 {
            return Err(QspError::InvalidTrialCount(0));
        }

        if !self.std.is_finite() || self.std < 0.0 {
            return Err(QspError::InvalidNoiseStd(self.std));
        }

        if !self.meansep.is_finite() {
            return Err(QspError::InvalidNoiseMean(self.meansep));
        }

        if !self.gtol.is_finite() || self.gtol <= 0.0 {
            return Err(QspError::InvalidConfig(format!(
                "gtol must be > 0, got {}",
                self.gtol
            )));
        }

        if !self.fd_step.is_finite() || self.fd_step <= 0.0 {
            return Err(QspError::InvalidConfig(format!(
                "fd_step must be > 0, got {}",
                self.fd_step
            )));
        }

        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1)
    }
}

impl fmt::Display for OptimizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OptimizerConfig(meansep={:.4}, std={:.4}, n={}, trials={}, method={})",
            self.meansep, self.std, self.n, self.num_trials, self.method
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::new(0.5, 0.1, 3);
        assert_eq!(config.num_trials, 100);
        assert_eq!(config.method, Method::Bfgs);
        assert_eq!(config.dimension(), 7);
        assert_eq!(config.iteration_cap(), 1400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = OptimizerConfig::new(0.5, 0.1, 2)
            .with_trials(50)
            .with_method(Method::NelderMead)
            .with_max_iterations(10);
        assert_eq!(config.num_trials, 50);
        assert_eq!(config.method, Method::NelderMead);
        assert_eq!(config.iteration_cap(), 10);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            OptimizerConfig::new(0.5, 0.1, 0).validate().unwrap_err(),
            QspError::EmptySequence
        );
        assert!(OptimizerConfig::new(0.5, -0.1, 1).validate().is_err());
        assert!(OptimizerConfig::new(0.5, 0.1, 1).with_trials(0).validate().is_err());
        assert!(OptimizerConfig::new(0.5, 0.1, 1).with_gtol(0.0).validate().is_err());
        // Zero noise is a valid point
        assert!(OptimizerConfig::new(0.5, 0.0, 1).validate().is_ok());
    }

    #[test]
    fn test_display() {
        let s = OptimizerConfig::new(0.5, 0.1, 2).to_string();
        assert!(s.contains("n=2"));
        assert!(s.contains("BFGS"));
    }
}
