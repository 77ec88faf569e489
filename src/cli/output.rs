//! CLI output formatting.
//!
//! Every function here writes to stdout only; errors go through the
//! command handlers.

use crate::clt::ConvergenceReport;
use crate::visualization::Animation;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print a boxed banner line.
pub fn print_banner(title: &str) {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║ {title:<61} ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");
}

/// Print version information.
pub fn print_version() {
    println!("clt-darts {}", env!("CARGO_PKG_VERSION"));
    if let Some(hash) = option_env!("GIT_HASH").filter(|h| !h.is_empty()) {
        println!("commit:    {hash}");
    }
    if let Some(ts) = option_env!("BUILD_TIMESTAMP") {
        println!("built:     {ts}");
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"clt-darts - The Central Limit Theorem, one dart at a time

Every day n darts land uniformly on a round board and we record their
average position. Watch the averages pile up near the bullseye, and
watch the distribution of their x-coordinate turn into a bell curve
with variance 0.25 / n.

USAGE:
    clt-darts <COMMAND> [OPTIONS]

COMMANDS:
    run                         Compute the animation
        -c, --config <FILE>     Load parameters from a YAML file
        --darts <N>             Darts per day (1-200, default 10)
        --days <N>              Days to simulate (500-5000, step 100, default 2000)
        --speed <N>             Days revealed per frame (10-200, default 50)
        --seed <N>              Seed the sampler (default: fresh entropy)
        -o, --out <PATH>        Export the animation to PATH
        --format <FMT>          json | jsonl | bin | csv (default: from PATH)
        -v, --verbose           Print per-frame progress

    verify                      Check that a seeded run is reproducible
        -c, --config <FILE>     Load parameters from a YAML file
        --seed <N>              Seed to verify (default: 42)
        --runs <N>              Number of runs to compare (default: 3)

    validate <FILE>             Validate a YAML configuration file

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    clt-darts run --darts 50 --days 3000
    clt-darts run --seed 7 --out run.bin
    clt-darts verify --runs 5
    clt-darts validate configs/default.yaml

Replay an exported animation with: clt-tui run.bin
"
    );
}

/// Print the outcome of a finished run.
pub fn print_run_summary(animation: &Animation) {
    let meta = &animation.metadata;
    println!("{RULE}");
    println!("{}", meta.title);
    println!("{RULE}\n");

    println!("Parameters:");
    println!("  Darts per day:  {}", meta.config.darts_per_day);
    println!("  Days:           {}", meta.config.total_days);
    println!("  Days per frame: {}", meta.config.frames_speed);
    println!("  Seed:           {}", meta.seed);

    println!("\nAnimation:");
    println!("  Frames:         {}", animation.len());
    println!(
        "  Duration:       {} ms ({} ms/frame)",
        animation.duration_ms(),
        meta.frame_interval_ms
    );
    if let Some(last) = animation.last_frame() {
        println!("  Final label:    {}", last.label);
    }

    print_convergence(&meta.convergence);
}

/// Print a convergence report.
pub fn print_convergence(report: &ConvergenceReport) {
    let sym = if report.is_converged() { "✓" } else { "!" };

    println!("\nConvergence (x-averages over {} days):", report.days);
    println!("  Mean:           {:+.5} (theory 0)", report.empirical_mean);
    println!(
        "  Variance:       {:.5} (theory {:.5})",
        report.empirical_variance, report.theoretical_variance
    );
    println!("  {sym} Ratio:        {:.3}", report.variance_ratio);
}

/// Print the per-run hashes of a reproducibility check.
pub fn print_verify_summary(hashes: &[String]) {
    let reference = hashes.first().map_or("", String::as_str);
    let identical = hashes.iter().all(|h| h == reference);
    let (status, sym) = if identical {
        ("PASSED", "✓")
    } else {
        ("FAILED", "✗")
    };

    println!("{RULE}");
    println!("Reproducibility Check");
    println!("{RULE}\n");
    println!("  Runs:      {}", hashes.len());
    println!("  Identical: {identical}");
    println!("\n  Reference Hash: {reference}");

    if hashes.len() > 1 {
        println!("\n  Run Hashes:");
        for (i, hash) in hashes.iter().enumerate() {
            let match_sym = if hash == reference { "=" } else { "!" };
            println!("    Run {}: {hash} {match_sym}", i + 1);
        }
    }

    println!("\n{RULE}");
    println!("{sym} Result: {status}");
    println!("{RULE}\n");
}
