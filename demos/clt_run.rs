//! Seeded Run Example
//!
//! Computes a seeded CLT dart animation, exports it, loads it back and
//! checks that the replayed artifact is bitwise identical.
//!
//! # Running
//! ```bash
//! cargo run --example clt_run
//! ```

use clt_darts::prelude::*;

fn main() -> CltResult<()> {
    println!("=== CLT Darts: Seeded Run ===\n");

    // 1. Simulate
    let config = SimulationConfig::new(10, 2000, 50)?;
    let seed = 42;
    println!("1. Simulation:");
    println!(
        "   n = {} darts/day, {} days, {} days/frame, seed {seed}\n",
        config.darts_per_day, config.total_days, config.frames_speed
    );

    let animation = Simulation::new(config, Some(seed))?.run(&mut |event: &RunEvent| {
        if let RunEvent::Completed { .. } = event {
            println!("   Done.");
        }
    })?;

    let report = &animation.metadata.convergence;
    println!("   Frames:            {}", animation.len());
    println!("   Empirical Var[x̄]:  {:.6}", report.empirical_variance);
    println!("   Predicted 0.25/n:  {:.6}", report.theoretical_variance);
    println!("   Ratio:             {:.4}\n", report.variance_ratio);

    // 2. Export
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("clt_run.bin");
    Exporter::new(ExportFormat::Binary).export(&animation, &path)?;
    println!("2. Export:");
    println!("   Written to {}\n", path.display());

    // 3. Reload and compare
    let loaded = Exporter::load(&path, None)?;
    let original_hash = animation.content_hash()?;
    let loaded_hash = loaded.content_hash()?;
    println!("3. Reload:");
    println!("   Original blake3: {original_hash}");
    println!("   Reloaded blake3: {loaded_hash}");
    println!("   Identical: {}\n", original_hash == loaded_hash);

    // 4. Same seed, same animation
    let again = Simulation::new(config, Some(seed))?.run_silent()?;
    println!("4. Reproducibility:");
    println!("   Re-run identical: {}", again.content_hash()? == original_hash);

    Ok(())
}
