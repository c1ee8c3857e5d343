//! QSPD Grid Sweep
//!
//! Optimizes QSP-3 on a coarse (separation, noise) grid, re-evaluates every
//! point with a large trial count, and compares against the classical
//! single shot and its three-shot majority vote.
//!
//! Writes `qsp-3-angles.json` and `qsp-3-data.txt` to the working directory.

use anyhow::Result;
use qsp_sweep::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║                  QSPD Noisy-Rotation Grid Sweep                      ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");

    let grid = GridSpec {
        xmin: 0.0,
        xmax: 0.5001,
        dx: 0.1,
        ymin: 0.0,
        ymax: 0.2001,
        dy: 0.05,
    };
    let config = SweepConfig::new(3)
        .with_grid(grid)
        .with_search_trials(100)
        .with_final_trials(2_000)
        .with_verbose(true);
    let seed = 42u64;

    println!("Configuration:");
    println!("  • {}", config);
    println!("  • Random seed: {}", seed);
    println!();

    let mut rng = StdRng::seed_from_u64(seed);

    // =========================================================================
    // Pass 1: optimize angles (x outer, y inner)
    // =========================================================================
    let table = sweep_angles(&config, &mut rng)?;
    table.save_json("qsp-3-angles.json")?;
    println!("Stored {} optimized grid points\n", table.len());

    // =========================================================================
    // Pass 2: high-precision success probabilities (y outer, x inner)
    // =========================================================================
    let qsp = evaluate_grid(&config, &table, &mut rng)?;
    qsp.save_text("qsp-3-data.txt")?;

    let classical = classical_grid(&grid)?;
    let maj3 = classical.try_map(|p| majority_vote(p, 3))?;
    let advantage = qsp.complement().log_ratio(&maj3.complement())?;

    println!("┌────────┬────────┬───────────┬───────────┬───────────┬────────────┐");
    println!("│ x/π    │ y/π    │ QSP-3     │ Single    │ MAJ-3     │ ln(e3/eQ)  │");
    println!("├────────┼────────┼───────────┼───────────┼───────────┼────────────┤");

    for (j, y) in grid.ys().into_iter().enumerate() {
        for (i, x) in grid.xs().into_iter().enumerate() {
            let cell = |g: &ProbabilityGrid| g.get(i, j).unwrap_or(f64::NAN);
            println!(
                "│ {:.3}  │ {:.3}  │ {:.6}  │ {:.6}  │ {:.6}  │ {:+.4}    │",
                x,
                y,
                cell(&qsp),
                cell(&classical),
                cell(&maj3),
                cell(&advantage)
            );
        }
    }

    println!("└────────┴────────┴───────────┴───────────┴───────────┴────────────┘");
    Ok(())
}
