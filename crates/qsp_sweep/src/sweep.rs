//! Grid sweeps
//!
//! Gantree: L5_Sweep → Sweep
//!
//! Two passes over a grid in units of π. The search pass runs one seeded
//! optimization per point with a cheap trial count and records the
//! parameters. The evaluation pass re-estimates every stored point with a
//! large trial count and returns a row-major probability grid.

use crate::angle_table::AngleTable;
use crate::grid::GridSpec;
use crate::probability::ProbabilityGrid;
use qsp_core::{sim, QspError, QspResult};
use qsp_optimize::{Method, OptimizerConfig, QspOptimizer, QspParams};
use qsp_sim::estimate_success;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Sweep configuration
/// Gantree: SweepConfig // 스윕 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Grid in units of π
    pub grid: GridSpec,

    /// QSP sequence length
    /// Gantree: n: usize // 시퀀스 길이 (3)
    pub n: usize,

    /// Trials per objective evaluation during the search pass
    pub search_trials: usize,

    /// Trials per point in the evaluation pass
    pub final_trials: usize,

    /// Minimization method
    pub method: Method,

    /// Print every grid point to stdout
    pub verbose: bool,
}

impl SweepConfig {
    /// Full-resolution sweep for sequence length `n`
    pub fn new(n: usize) -> Self {
        Self {
            grid: GridSpec::default_sweep(),
            n,
            search_trials: sim::DEFAULT_NUM_TRIALS,
            final_trials: sim::FINAL_NUM_TRIALS,
            method: Method::Bfgs,
            verbose: false,
        }
    }

    /// Set grid
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    /// Set search-pass trials
    pub fn with_search_trials(mut self, trials: usize) -> Self {
        self.search_trials = trials;
        self
    }

    /// Set evaluation-pass trials
    pub fn with_final_trials(mut self, trials: usize) -> Self {
        self.final_trials = trials;
        self
    }

    /// Set minimization method
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set verbose
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Optimizer settings for the grid point `(x, y)`
    pub fn optimizer_config(&self, x: f64, y: f64) -> OptimizerConfig {
        OptimizerConfig::new(x * PI, y * PI, self.n)
            .with_trials(self.search_trials)
            .with_method(self.method)
    }

    /// Validate configuration
    pub fn validate(&self) -> QspResult<()> {
        self.grid.validate()?;
        if self.n == 0 {
            return Err(QspError::EmptySequence);
        }
        if self.search_trials == 0 {
            return Err(QspError::InvalidTrialCount(self.search_trials));
        }
        if self.final_trials == 0 {
            return Err(QspError::InvalidTrialCount(self.final_trials));
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new(3)
    }
}

impl fmt::Display for SweepConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SweepConfig(n={}, trials={}/{}, method={}, grid: {})",
            self.n, self.search_trials, self.final_trials, self.method, self.grid
        )
    }
}

/// Search pass: optimize every grid point, `x` outer and `y` inner
/// Gantree: sweep_angles(config,rng) -> AngleTable // 각도 탐색
pub fn sweep_angles<R: Rng + ?Sized>(config: &SweepConfig, rng: &mut R) -> QspResult<AngleTable> {
    config.validate()?;
    let ys = config.grid.ys();
    let mut table = AngleTable::new();

    log::info!("angle sweep: {}", config);
    for x in config.grid.xs() {
        for &y in &ys {
            let result = QspOptimizer::new(config.optimizer_config(x, y)).optimize(rng)?;
            if config.verbose {
                println!("({:.3}, {:.3}) {}", x, y, result);
            }
            table.insert_result(x, y, result);
        }
        log::info!("x = {:.3} done ({} points stored)", x, table.len());
    }
    Ok(table)
}

/// Evaluation pass: success probability at every stored point, `y` outer
/// and `x` inner
/// Gantree: evaluate_grid(config,table,rng) -> ProbabilityGrid // 고정밀 평가
pub fn evaluate_grid<R: Rng + ?Sized>(
    config: &SweepConfig,
    table: &AngleTable,
    rng: &mut R,
) -> QspResult<ProbabilityGrid> {
    config.validate()?;
    let xs = config.grid.xs();
    let mut rows = Vec::new();

    for y in config.grid.ys() {
        let mut row = Vec::with_capacity(xs.len());
        for &x in &xs {
            let entry = table.lookup(x, y)?;
            let params = QspParams::unpack(&entry.params, config.n)?;
            let p = estimate_success(
                x * PI,
                y * PI,
                config.n,
                &params.phases,
                &params.start.ket(),
                &params.end.bra(),
                config.final_trials,
                rng,
            )?;
            if config.verbose {
                println!("({:.3}, {:.3}) p = {:.6}", x, y, p);
            }
            row.push(p);
        }
        log::info!("y = {:.3} row done", y);
        rows.push(row);
    }
    ProbabilityGrid::new(rows)
}

/// Both passes back to back
pub fn run_sweep<R: Rng + ?Sized>(
    config: &SweepConfig,
    rng: &mut R,
) -> QspResult<(AngleTable, ProbabilityGrid)> {
    let table = sweep_angles(config, rng)?;
    let grid = evaluate_grid(config, &table, rng)?;
    Ok((table, grid))
}

// ============================================================================
// Tests
// ============================================================================
